//! Errors for query translation.

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty statement")]
    EmptyStatement,
    #[error("matched '{marker}' as a placeholder but cannot get its index ({reason}) in query: {template}")]
    UnparsableIndex {
        marker: String,
        template: String,
        reason: String,
    },
    #[error("placeholder ${index} does not refer to one of the {arguments} supplied arguments")]
    IndexOutOfRange { index: usize, arguments: usize },
    #[error("query expects {expected} arguments, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    #[error("argument {position} is {value}, which has no SQL literal")]
    NonFiniteArgument { position: usize, value: String },
}
