//! Describe the execution of a query: what to send and how to read the answer.

use query_engine_metadata::metadata::ResponseEncoding;

use super::envelope::{EnvelopeError, QueryEnvelope};
use super::string::SQL;

/// Definition of an execution plan to be run against the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    pub query: SQL,
    /// How the response is expected to be encoded.
    pub encoding: ResponseEncoding,
}

impl ExecutionPlan {
    pub fn new(query: SQL, encoding: ResponseEncoding) -> ExecutionPlan {
        ExecutionPlan { query, encoding }
    }

    pub fn query_sql(&self) -> &SQL {
        &self.query
    }

    /// The serialized request body for this plan.
    pub fn request_body(&self) -> Result<Vec<u8>, EnvelopeError> {
        QueryEnvelope::new(&self.query)?.to_bytes()
    }
}
