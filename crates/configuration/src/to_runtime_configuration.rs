//! Convert the parsed configuration metadata to internal engine metadata
//! That can be used by the connector at runtime.

use std::time::Duration;

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{Dsn, Secret};
use crate::version1::ParsedConfiguration;

/// The path of the SQL endpoint, relative to the dsn.
pub const QUERY_ENDPOINT_PATH: &str = "/druid/v2/sql";

pub const DEFAULT_USER_AGENT: &str = concat!("druid-sql/", env!("CARGO_PKG_VERSION"));

/// Convert the parsed configuration to a runtime configuration.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let dsn = match parsed_config.dsn {
        Dsn(Secret::Plain(dsn)) => dsn,
        Dsn(Secret::FromEnvironment { variable }) => environment.read(&variable)?,
    };

    Ok(Configuration {
        endpoint: query_endpoint(&dsn)?,
        user_agent: parsed_config
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        placeholder_style: parsed_config.placeholder_style,
        response_encoding: parsed_config.response_encoding,
        timeout: parsed_config.timeout_seconds.map(Duration::from_secs),
    })
}

/// Derive the query endpoint from a dsn: one trailing slash is dropped and the SQL path is
/// appended.
pub fn query_endpoint(dsn: &str) -> Result<String, MakeRuntimeConfigurationError> {
    let dsn = dsn.trim();
    if dsn.is_empty() {
        return Err(MakeRuntimeConfigurationError::EmptyDsn);
    }

    let url = url::Url::parse(dsn).map_err(|err| MakeRuntimeConfigurationError::InvalidDsn {
        dsn: dsn.to_string(),
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MakeRuntimeConfigurationError::InvalidDsn {
            dsn: dsn.to_string(),
            message: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    let base = dsn.strip_suffix('/').unwrap_or(dsn);
    Ok(format!("{base}{QUERY_ENDPOINT_PATH}"))
}
