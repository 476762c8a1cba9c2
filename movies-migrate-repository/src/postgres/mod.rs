//! PostgreSQL destination: connection, upsert writer and read-back.
//!
//! The destination schema is expected to exist already. `migrations/` holds
//! the DDL the integration tests apply to their scratch databases.
mod connection;
mod reader;
mod writer;

pub use connection::connect;
pub use reader::{count_rows, read_rows};
pub use writer::{quote_ident, upsert_statement, PostgresRecordWriter};
