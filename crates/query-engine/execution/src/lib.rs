//! Query execution against the engine's SQL endpoint, and the typed cursor over its answer.

pub mod cursor;
pub mod error;
pub mod metrics;
pub mod query;
pub mod response;
pub mod result_set;
pub mod transport;
