//! A connection to the engine.

use std::sync::Arc;

use druid_sql_configuration::Configuration;
use query_engine_execution::cursor::RowCursor;
use query_engine_sql::sql::value::Value;

use crate::error::Error;
use crate::health;
use crate::state::State;
use crate::statement::Statement;
use crate::transaction::Transaction;

/// A configured endpoint plus the HTTP client used to reach it.
///
/// Nothing is held open between requests, so a connection is cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Connection {
    configuration: Arc<Configuration>,
    state: Arc<State>,
}

impl Connection {
    pub(crate) fn new(configuration: Arc<Configuration>, state: Arc<State>) -> Self {
        Connection {
            configuration,
            state,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Prepare `query` for execution. Only the placeholders are inspected.
    pub fn prepare(&self, query: &str) -> Statement {
        Statement::new(
            query.to_string(),
            self.configuration.clone(),
            self.state.clone(),
        )
    }

    /// Prepare and run `query` in one step.
    pub async fn query(&self, query: &str, arguments: &[Value]) -> Result<RowCursor, Error> {
        self.prepare(query).query(arguments).await
    }

    pub fn begin(&self) -> Transaction {
        Transaction::new()
    }

    /// Check the engine answers a trivial query.
    pub async fn health_check(&self) -> Result<(), Error> {
        health::health_check(&self.configuration, &self.state).await
    }

    pub fn close(self) -> Result<(), Error> {
        Ok(())
    }
}
