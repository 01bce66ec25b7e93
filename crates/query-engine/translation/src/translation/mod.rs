//! Translate a query template and its arguments to an ExecutionPlan (literal SQL) to be run against the engine.

pub mod error;
pub mod query;
