use movies_migrate_shared::{Table, UnknownTable};
use thiserror::Error;

/// Represents errors raised while reading the SQLite source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open source database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    UnknownTable(#[from] UnknownTable),

    #[error("Batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("Failed to read {table}: {source}")]
    Query {
        table: Table,
        #[source]
        source: sqlx::Error,
    },

    #[error("{table}.{column}: unsupported source value of type {type_name}")]
    UnsupportedValue {
        table: Table,
        column: String,
        type_name: String,
    },
}
