//! Configuration for the connector.

use std::time::Duration;

use query_engine_metadata::metadata::ResponseEncoding;
use query_engine_sql::sql::placeholder::PlaceholderStyle;
use schemars::schema::RootSchema;

use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration'. Every secret has been resolved and the query endpoint has been
/// derived from the dsn by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// The full URL that statements are posted to.
    pub endpoint: String,
    pub user_agent: String,
    pub placeholder_style: PlaceholderStyle,
    pub response_encoding: ResponseEncoding,
    pub timeout: Option<Duration>,
}

/// Generate the JSON schema of the configuration file.
pub fn generate_latest_schema() -> RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}
