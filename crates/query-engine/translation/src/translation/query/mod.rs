//! Translate a query template and positional arguments into an execution plan.

pub mod placeholders;
pub mod values;

use query_engine_metadata::metadata::ResponseEncoding;
use query_engine_sql::sql;

use crate::translation::error::Error;

/// Everything a single query invocation brings with it.
#[derive(Debug, Clone, Copy)]
pub struct QueryRequest<'a> {
    pub template: &'a str,
    pub arguments: &'a [sql::value::Value],
    pub placeholder_style: sql::placeholder::PlaceholderStyle,
    pub response_encoding: ResponseEncoding,
}

/// Translate a query request into an execution plan.
pub fn translate(request: QueryRequest) -> Result<sql::execution_plan::ExecutionPlan, Error> {
    if request.template.trim().is_empty() {
        return Err(Error::EmptyStatement);
    }

    let query = placeholders::translate(
        request.template,
        request.arguments,
        request.placeholder_style,
    )?;

    tracing::info!(
        generated_sql = %query.sql,
        literals = query.literal_count,
        "translated query"
    );

    Ok(sql::execution_plan::ExecutionPlan::new(
        query,
        request.response_encoding,
    ))
}
