//! SQLite source: extraction queries and batched row reading.
mod connection;
mod queries;
mod reader;

pub use connection::SqliteSource;
pub use queries::{extraction_query, query_for};
pub use reader::BatchReader;
