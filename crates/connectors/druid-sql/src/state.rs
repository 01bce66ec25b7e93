//! Transient state used by a connection.
//!
//! The HTTP client is built when a connection opens; metrics are registered once per driver.

use thiserror::Error;
use tracing::info_span;

use druid_sql_configuration::Configuration;
use query_engine_execution::metrics;
use query_engine_execution::transport::Transport;

/// State shared by every statement of a connection.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
    pub transport: Transport,
}

/// Register the client's counters in `metrics_registry`.
pub fn initialize_metrics(
    metrics_registry: &mut prometheus::Registry,
) -> Result<metrics::Metrics, InitializationError> {
    info_span!("Setup metrics").in_scope(|| {
        metrics::Metrics::initialize(metrics_registry).map_err(InitializationError::MetricsError)
    })
}

/// Build the HTTP client for the configured endpoint and wrap it inside a State.
pub fn create_state(
    configuration: &Configuration,
    metrics: metrics::Metrics,
) -> Result<State, InitializationError> {
    let transport = info_span!("Setup transport", endpoint = %configuration.endpoint)
        .in_scope(|| {
            Transport::new(
                configuration.endpoint.clone(),
                configuration.user_agent.clone(),
                configuration.timeout,
            )
        })
        .map_err(InitializationError::UnableToCreateClient)?;

    Ok(State { metrics, transport })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize http client: {0}")]
    UnableToCreateClient(query_engine_execution::error::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
