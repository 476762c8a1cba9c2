use movies_migrate_shared::Record;

use crate::errors::WriterError;

/// What an upsert did with a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// A row with the same id already existed and was left untouched.
    AlreadyPresent,
}

/// Destination of migrated records.
///
/// All writes of one run go through the same writer and therefore the same
/// transaction, which `commit` makes durable once the run is over.
#[async_trait::async_trait]
pub trait RecordWriter: Send {
    /// Inserts `record` unless a row with its id already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(UpsertOutcome)` - The row was written or was already there
    /// * `Err(WriterError::Rejected)` - The destination refused this row; the
    ///   writer remains usable
    /// * `Err(_)` - Any other variant is fatal for the run
    async fn upsert<R: Record>(&mut self, record: &R) -> Result<UpsertOutcome, WriterError>;

    /// Commits everything written so far. Consumes the writer.
    async fn commit(self) -> Result<(), WriterError>;
}
