//! Internal Configuration and state for our connector.

use std::path::Path;

use query_engine_metadata::metadata::ResponseEncoding;
use query_engine_sql::sql::placeholder::PlaceholderStyle;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::configuration::generate_latest_schema;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{Dsn, Secret};

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";
pub const DEFAULT_DSN_VARIABLE: &str = "DRUID_DSN";

/// Initial configuration, just enough to reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Configuration format version.
    pub version: u32,
    /// The base URL of the engine, or the environment variable holding it.
    pub dsn: Dsn,
    /// The User-Agent sent with every request. Defaults to `druid-sql/<version>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// How placeholders in statement templates are recognized.
    #[serde(default)]
    pub placeholder_style: PlaceholderStyle,
    /// How response bodies are decoded.
    #[serde(default)]
    pub response_encoding: ResponseEncoding,
    /// Request timeout. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl ParsedConfiguration {
    /// A configuration which reads the dsn from `DRUID_DSN`.
    pub fn empty() -> Self {
        Self::with_dsn(Dsn(Secret::FromEnvironment {
            variable: DEFAULT_DSN_VARIABLE.to_string(),
        }))
    }

    pub fn with_dsn(dsn: impl Into<Dsn>) -> Self {
        Self {
            version: CURRENT_VERSION,
            dsn: dsn.into(),
            user_agent: None,
            placeholder_style: PlaceholderStyle::default(),
            response_encoding: ResponseEncoding::default(),
            timeout_seconds: None,
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            found: parsed_config.version,
            expected: CURRENT_VERSION,
        });
    }

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    fs::create_dir_all(out_dir.as_ref()).await?;

    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    let schema_file = out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);
    fs::write(
        schema_file,
        serde_json::to_string_pretty(&generate_latest_schema())? + "\n",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut configuration = ParsedConfiguration::with_dsn("http://localhost:8888");
        configuration.placeholder_style = PlaceholderStyle::Ordinal;
        configuration.timeout_seconds = Some(30);

        write_parsed_configuration(&configuration, dir.path())
            .await
            .unwrap();
        let parsed = parse_configuration(dir.path()).await.unwrap();

        similar_asserts::assert_eq!(parsed, configuration);
    }

    #[tokio::test]
    async fn fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            r#"{ "version": 1, "dsn": { "variable": "MY_DSN" } }"#,
        )
        .unwrap();

        let parsed = parse_configuration(dir.path()).await.unwrap();

        assert_eq!(
            parsed.dsn,
            Dsn(Secret::FromEnvironment {
                variable: "MY_DSN".to_string()
            })
        );
        assert_eq!(parsed.placeholder_style, PlaceholderStyle::Infer);
        assert_eq!(parsed.response_encoding, ResponseEncoding::Auto);
        assert_eq!(parsed.user_agent, None);
        assert_eq!(parsed.timeout_seconds, None);
    }

    #[tokio::test]
    async fn reports_the_position_of_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            "{\n  \"version\": 1,\n  \"dsn\": \n}",
        )
        .unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        match error {
            ParseConfigurationError::ParseError { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            r#"{ "version": 2, "dsn": "http://localhost:8888" }"#,
        )
        .unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        assert!(matches!(
            error,
            ParseConfigurationError::UnsupportedVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        assert!(matches!(
            error,
            ParseConfigurationError::IoErrorButStringified(_)
        ));
    }

    #[test]
    fn written_configuration_conforms_to_the_schema() {
        let schema = serde_json::to_value(generate_latest_schema()).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();

        let mut configuration = ParsedConfiguration::empty();
        configuration.user_agent = Some("reporting/2.0".to_string());
        let instance = serde_json::to_value(&configuration).unwrap();

        assert!(compiled.is_valid(&instance));
    }
}
