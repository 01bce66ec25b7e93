//! Health check for a connection.

use tracing::{info_span, Instrument};

use druid_sql_configuration::Configuration;
use query_engine_sql::sql::placeholder::PlaceholderStyle;
use query_engine_translation::translation::query::{self, QueryRequest};

use crate::error::Error;
use crate::state::State;

pub const HEALTH_CHECK_QUERY: &str = "SELECT 1";

/// Check the engine is reachable and answers `SELECT 1` with a single row.
pub async fn health_check(configuration: &Configuration, state: &State) -> Result<(), Error> {
    let plan = query::translate(QueryRequest {
        template: HEALTH_CHECK_QUERY,
        arguments: &[],
        placeholder_style: PlaceholderStyle::Ordinal,
        response_encoding: configuration.response_encoding,
    })?;

    let cursor = query_engine_execution::query::execute(&state.transport, &state.metrics, plan)
        .instrument(info_span!("Health check"))
        .await?;

    let mut rows = 0;
    while cursor.next_row()?.is_some() {
        rows += 1;
    }
    cursor.close();

    if rows == 1 {
        Ok(())
    } else {
        Err(Error::Unhealthy { rows })
    }
}
