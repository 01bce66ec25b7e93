//! Errors for query execution.

use query_engine_sql::sql::envelope::EnvelopeError;
use thiserror::Error;

/// Errors raised while sending a query and decoding its response.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot prepare query: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("cannot query server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("cannot query: {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors decoding a response body into a result set.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty response payload")]
    EmptyPayload,
    #[error("malformed response payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid header row: {0}")]
    InvalidHeader(String),
    #[error("row {row} has {actual} values but there are {expected} columns")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("malformed tabular payload: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors reading rows from a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("number of destination slots ({actual}) does not match column count ({expected})")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("no next data record")]
    EndOfData,
    #[error("cannot convert {from} cell to {to}")]
    Conversion {
        from: &'static str,
        to: &'static str,
    },
}
