//! # Movies Migrate Repository
//! Storage adapters for the migration: the SQLite source (extraction queries
//! and batched reads) and the PostgreSQL destination (idempotent upserts inside
//! one shared transaction, plus read-back for verification).
pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod sqlite;

pub use errors::{DestinationError, SourceError, WriterError};
pub use interfaces::{RecordWriter, UpsertOutcome};
pub use postgres::{connect, count_rows, read_rows, PostgresRecordWriter};
pub use sqlite::{extraction_query, query_for, BatchReader, SqliteSource};
