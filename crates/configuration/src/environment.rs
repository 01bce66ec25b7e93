//! Where secrets that are not written into the configuration come from.

use std::collections::HashMap;

use thiserror::Error;

/// Read access to environment variables.
pub trait Environment {
    fn read(&self, variable: &str) -> Result<String, Error>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &str) -> Result<String, Error> {
        std::env::var(variable).map_err(|err| match err {
            std::env::VarError::NotPresent => Error::VariableNotPresent(variable.to_string()),
            std::env::VarError::NotUnicode(_) => Error::NonUnicodeValue(variable.to_string()),
        })
    }
}

/// A fixed set of variables, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<String, String>);

impl<const N: usize> From<[(String, String); N]> for FixedEnvironment {
    fn from(value: [(String, String); N]) -> Self {
        FixedEnvironment(HashMap::from(value))
    }
}

impl Environment for FixedEnvironment {
    fn read(&self, variable: &str) -> Result<String, Error> {
        self.0.read(variable)
    }
}

impl Environment for HashMap<String, String> {
    fn read(&self, variable: &str) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.to_string()))
    }
}

impl<T: Environment> Environment for &T {
    fn read(&self, variable: &str) -> Result<String, Error> {
        (**self).read(variable)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("the environment variable {0:?} is not set")]
    VariableNotPresent(String),
    #[error("the environment variable {0:?} is not valid unicode")]
    NonUnicodeValue(String),
}
