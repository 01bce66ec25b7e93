//! Metadata information regarding result sets returned by the engine.

pub mod database;
pub mod encoding;

// re-export without modules
pub use database::*;
pub use encoding::*;
