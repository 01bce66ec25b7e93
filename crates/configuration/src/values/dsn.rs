use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;

/// The base URL of the engine, e.g. `http://127.0.0.1:8888`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Dsn(pub Secret);

impl From<String> for Dsn {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for Dsn {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
