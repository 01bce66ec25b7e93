//! Literal query text and the request that carries it to the engine.

pub mod envelope;
pub mod execution_plan;
pub mod placeholder;
pub mod string;
pub mod value;
