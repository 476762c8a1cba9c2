use movies_migrate_shared::Table;
use thiserror::Error;
use uuid::Uuid;

/// Represents errors raised by a [`crate::RecordWriter`].
///
/// `Rejected` concerns a single row and leaves the shared transaction usable.
/// The other variants mean the transaction itself is in trouble and the run
/// cannot go on.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("{table} row {id} rejected: {source}")]
    Rejected {
        table: Table,
        id: Uuid,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to connect to destination: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[source] sqlx::Error),

    #[error("Failed to commit: {0}")]
    Commit(#[source] sqlx::Error),
}

impl WriterError {
    /// Whether the error concerns a single row only.
    pub fn is_row_level(&self) -> bool {
        matches!(self, WriterError::Rejected { .. })
    }
}
