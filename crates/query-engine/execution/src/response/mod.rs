//! Decode a raw response body into a result set.
//!
//! Parsing is all-or-nothing: on failure the partially built rows are dropped and
//! only the error is returned.

pub mod tabular;
pub mod typed_array;

use query_engine_metadata::metadata::ResponseEncoding;

use crate::error::ParseError;
use crate::result_set::ResultSet;

/// Parse `raw` according to `encoding`, resolving `Auto` from the declared content type.
pub fn parse(
    raw: &[u8],
    encoding: ResponseEncoding,
    content_type: Option<&str>,
) -> Result<ResultSet, ParseError> {
    match encoding.resolve(content_type) {
        ResponseEncoding::Auto | ResponseEncoding::TypedArray => typed_array::parse(raw),
        ResponseEncoding::Tabular => tabular::parse(raw),
    }
}
