//! A SQL client for the engine's HTTP query endpoint.
//!
//! A [`Driver`] opens a [`Connection`] from a dsn or a configuration; statements prepared on
//! it are translated to literal SQL, posted, and read back through a [`RowCursor`].

pub mod connection;
pub mod driver;
pub mod error;
pub mod health;
pub mod state;
pub mod statement;
pub mod transaction;

pub use connection::Connection;
pub use driver::Driver;
pub use error::Error;
pub use statement::Statement;
pub use transaction::Transaction;

pub use query_engine_execution::cursor::RowCursor;
pub use query_engine_execution::result_set::{CellValue, FromCell};
pub use query_engine_sql::sql::value::Value;
