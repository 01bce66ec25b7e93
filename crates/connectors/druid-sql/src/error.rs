//! Errors surfaced to callers of the client.

use thiserror::Error;

use druid_sql_configuration::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use query_engine_execution::error::ScanError;

use crate::state::InitializationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(#[from] MakeRuntimeConfigurationError),
    #[error("{0}")]
    ParseConfiguration(#[from] ParseConfigurationError),
    #[error("{0}")]
    Initialization(#[from] InitializationError),
    #[error("{0}")]
    Translation(#[from] query_engine_translation::translation::error::Error),
    #[error("{0}")]
    Execution(#[from] query_engine_execution::error::Error),
    #[error("{0}")]
    Scan(#[from] ScanError),
    #[error("{operation} is not supported")]
    NotSupported { operation: &'static str },
    #[error("health check expected exactly one row, got {rows}")]
    Unhealthy { rows: usize },
}
