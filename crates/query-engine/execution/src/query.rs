//! Execute an execution plan against the engine.

use tracing::{info_span, Instrument};

use query_engine_sql::sql;

use crate::cursor::RowCursor;
use crate::error::Error;
use crate::metrics;
use crate::response;
use crate::result_set::ResultSet;
use crate::transport::Transport;

/// Send the plan's query and materialize the response into a cursor.
pub async fn execute(
    transport: &Transport,
    metrics: &metrics::Metrics,
    plan: sql::execution_plan::ExecutionPlan,
) -> Result<RowCursor, Error> {
    match execute_plan(transport, &plan).await {
        Ok(result_set) => {
            metrics.record_successful_query(result_set.row_count());
            Ok(RowCursor::new(result_set))
        }
        Err(err) => {
            metrics.record_failed_query();
            tracing::error!(error = %err, generated_sql = %plan.query, "query failed");
            Err(err)
        }
    }
}

async fn execute_plan(
    transport: &Transport,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<ResultSet, Error> {
    let body = info_span!("Build request").in_scope(|| plan.request_body())?;

    let response = transport
        .post(body)
        .instrument(info_span!("Send request", endpoint = transport.endpoint()))
        .await?;

    let result_set = info_span!("Parse response", encoding = ?plan.encoding).in_scope(|| {
        response::parse(
            &response.body,
            plan.encoding,
            response.content_type.as_deref(),
        )
    })?;

    tracing::debug!(
        columns = result_set.columns().len(),
        rows = result_set.row_count(),
        "materialized response"
    );

    Ok(result_set)
}
