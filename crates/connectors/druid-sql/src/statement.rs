//! Prepared statements.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use druid_sql_configuration::Configuration;
use query_engine_execution::cursor::RowCursor;
use query_engine_sql::sql::value::Value;
use query_engine_translation::translation::error::Error as TranslationError;
use query_engine_translation::translation::query::{self, placeholders, QueryRequest};

use crate::error::Error;
use crate::state::State;

/// A query template bound to a connection.
#[derive(Debug, Clone)]
pub struct Statement {
    query: String,
    num_input: usize,
    configuration: Arc<Configuration>,
    state: Arc<State>,
}

impl Statement {
    pub(crate) fn new(query: String, configuration: Arc<Configuration>, state: Arc<State>) -> Self {
        let num_input = placeholders::count_placeholders(&query, configuration.placeholder_style);
        Statement {
            query,
            num_input,
            configuration,
            state,
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    /// The number of arguments the template declares.
    ///
    /// For ordinal placeholders this is the highest index referenced. `?` markers are only
    /// counted when the connection forces anonymous placeholders.
    pub fn num_input(&self) -> usize {
        self.num_input
    }

    /// Substitute `arguments`, send the query and return a cursor over the answer.
    pub async fn query(&self, arguments: &[Value]) -> Result<RowCursor, Error> {
        let plan = info_span!("Translate query").in_scope(|| {
            self.check_argument_count(arguments)?;
            query::translate(QueryRequest {
                template: &self.query,
                arguments,
                placeholder_style: self.configuration.placeholder_style,
                response_encoding: self.configuration.response_encoding,
            })
        });
        let plan = match plan {
            Ok(plan) => plan,
            Err(err) => {
                self.state.metrics.record_failed_query();
                tracing::error!(error = %err, "query translation failed");
                return Err(err.into());
            }
        };

        let cursor = query_engine_execution::query::execute(
            &self.state.transport,
            &self.state.metrics,
            plan,
        )
        .instrument(info_span!("Execute query"))
        .await?;

        Ok(cursor)
    }

    /// A template that declares inputs takes exactly that many arguments, whatever
    /// convention the arguments would otherwise select.
    fn check_argument_count(&self, arguments: &[Value]) -> Result<(), TranslationError> {
        if self.num_input > 0 && arguments.len() != self.num_input {
            return Err(TranslationError::ArgumentCountMismatch {
                expected: self.num_input,
                actual: arguments.len(),
            });
        }
        Ok(())
    }

    /// Statements that change data have no endpoint to go to.
    pub fn exec(&self, _arguments: &[Value]) -> Result<u64, Error> {
        Err(Error::NotSupported { operation: "exec" })
    }

    pub fn close(self) -> Result<(), Error> {
        Ok(())
    }
}
