//! Opening connections.

use std::path::Path;
use std::sync::Arc;

use druid_sql_configuration as configuration;
use druid_sql_configuration::environment::{Environment, ProcessEnvironment};
use query_engine_execution::metrics::Metrics;

use crate::connection::Connection;
use crate::error::Error;
use crate::state;

/// Creates connections. Holds the environment secrets are read from and the metrics every
/// connection reports to.
#[derive(Debug, Clone)]
pub struct Driver<Env: Environment = ProcessEnvironment> {
    environment: Env,
    metrics: Metrics,
}

impl Driver<ProcessEnvironment> {
    /// A driver reading secrets from the process environment, reporting into its own registry.
    pub fn from_process_environment() -> Result<Self, Error> {
        Self::new(ProcessEnvironment, &mut prometheus::Registry::new())
    }
}

impl<Env: Environment> Driver<Env> {
    pub fn new(environment: Env, metrics_registry: &mut prometheus::Registry) -> Result<Self, Error> {
        let metrics = state::initialize_metrics(metrics_registry)?;
        Ok(Driver {
            environment,
            metrics,
        })
    }

    /// Open a connection to the engine at `dsn`, with default settings.
    ///
    /// No request is made; an unreachable engine shows up on the first query.
    pub fn open(&self, dsn: &str) -> Result<Connection, Error> {
        self.connect(configuration::ParsedConfiguration::with_dsn(dsn))
    }

    /// Open a connection described by a parsed configuration.
    pub fn connect(
        &self,
        parsed_configuration: configuration::ParsedConfiguration,
    ) -> Result<Connection, Error> {
        let configuration =
            configuration::make_runtime_configuration(parsed_configuration, &self.environment)?;
        let state = state::create_state(&configuration, self.metrics.clone())?;
        tracing::debug!(endpoint = %configuration.endpoint, "opened connection");
        Ok(Connection::new(Arc::new(configuration), Arc::new(state)))
    }

    /// Open a connection described by the `configuration.json` in `configuration_dir`.
    pub async fn connect_from_directory(
        &self,
        configuration_dir: impl AsRef<Path>,
    ) -> Result<Connection, Error> {
        let parsed_configuration = configuration::parse_configuration(configuration_dir).await?;
        self.connect(parsed_configuration)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
