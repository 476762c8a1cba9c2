use movies_migrate_shared::Table;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;

use super::queries::extraction_query;
use super::reader::BatchReader;
use crate::errors::SourceError;

/// The source database, opened read-only over a single connection.
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    /// Opens the database file at `path`. The file must already exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| SourceError::Connection {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Opened source database");
        Ok(Self { pool })
    }

    /// Wraps an existing pool, e.g. an in-memory database.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Starts reading `table` in batches of at most `batch_size` rows.
    ///
    /// Nothing is sent to the database until the first
    /// [`BatchReader::next_batch`] call.
    pub fn batches(&self, table: Table, batch_size: usize) -> Result<BatchReader<'_>, SourceError> {
        if batch_size == 0 {
            return Err(SourceError::InvalidBatchSize(batch_size));
        }
        Ok(BatchReader::new(
            table,
            batch_size,
            sqlx::query(extraction_query(table)).fetch(&self.pool),
        ))
    }

    /// Number of rows in the source table.
    pub async fn count(&self, table: Table) -> Result<i64, SourceError> {
        let query = format!("SELECT COUNT(*) AS total FROM {}", table.name());
        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|source| SourceError::Query { table, source })?;
        row.try_get("total")
            .map_err(|source| SourceError::Query { table, source })
    }
}
