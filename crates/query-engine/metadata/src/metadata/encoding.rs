//! The response encodings the engine may answer with.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a response body should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ResponseEncoding {
    /// Decide from the response's content type.
    #[default]
    Auto,
    /// A JSON array of arrays: column names, column type tags, then values.
    TypedArray,
    /// CSV text: a line of column names, then values.
    Tabular,
}

impl ResponseEncoding {
    /// Pick a concrete encoding. `Auto` looks at the declared content type:
    /// `text/csv` and `text/plain` are tabular, everything else is a typed array.
    pub fn resolve(self, content_type: Option<&str>) -> ResponseEncoding {
        match self {
            ResponseEncoding::Auto => {
                let media_type = content_type
                    .and_then(|value| value.split(';').next())
                    .map(|value| value.trim().to_ascii_lowercase());
                match media_type.as_deref() {
                    Some("text/csv" | "text/plain") => ResponseEncoding::Tabular,
                    _ => ResponseEncoding::TypedArray,
                }
            }
            concrete => concrete,
        }
    }
}
