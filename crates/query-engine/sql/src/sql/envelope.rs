//! The JSON request body posted to the SQL endpoint.

use serde::Serialize;
use thiserror::Error;

use super::string::SQL;

/// The output format requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Each row is a JSON array of values.
    Array,
}

/// A query request as the engine expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEnvelope {
    pub query: String,
    pub result_format: ResultFormat,
    /// Ask for a first row of column names.
    pub header: bool,
    /// Ask for a second row of column type tags.
    pub types_header: bool,
}

impl QueryEnvelope {
    pub fn new(query: &SQL) -> Result<QueryEnvelope, EnvelopeError> {
        if query.is_blank() {
            return Err(EnvelopeError::EmptyQuery);
        }
        Ok(QueryEnvelope {
            query: query.sql.clone(),
            result_format: ResultFormat::Array,
            header: true,
            types_header: true,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(EnvelopeError::Serialization)
    }
}

/// Errors building a request body.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("refusing to send an empty query")]
    EmptyQuery,
    #[error("unable to serialize query request: {0}")]
    Serialization(serde_json::Error),
}
