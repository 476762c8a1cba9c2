use futures::stream::BoxStream;
use futures::TryStreamExt;
use movies_migrate_shared::{RawRow, SourceValue, Table};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, ValueRef};

use crate::errors::SourceError;

/// Reads one table in fixed-size batches.
///
/// Rows are streamed from the open cursor, so at most one batch is held in
/// memory at a time.
pub struct BatchReader<'a> {
    table: Table,
    batch_size: usize,
    rows: BoxStream<'a, Result<SqliteRow, sqlx::Error>>,
    exhausted: bool,
}

impl<'a> BatchReader<'a> {
    pub(crate) fn new(
        table: Table,
        batch_size: usize,
        rows: BoxStream<'a, Result<SqliteRow, sqlx::Error>>,
    ) -> Self {
        Self {
            table,
            batch_size,
            rows,
            exhausted: false,
        }
    }

    /// Returns the next batch of up to `batch_size` rows.
    ///
    /// An empty batch means the table has been read completely. Every later
    /// call returns an empty batch as well, also after an error.
    pub async fn next_batch(&mut self) -> Result<Vec<RawRow>, SourceError> {
        let mut batch = Vec::new();
        if self.exhausted {
            return Ok(batch);
        }

        match self.fill(&mut batch).await {
            Ok(()) => Ok(batch),
            Err(e) => {
                self.exhausted = true;
                Err(e)
            }
        }
    }

    async fn fill(&mut self, batch: &mut Vec<RawRow>) -> Result<(), SourceError> {
        while batch.len() < self.batch_size {
            let next = self.rows.try_next().await.map_err(|source| SourceError::Query {
                table: self.table,
                source,
            })?;
            match next {
                Some(row) => batch.push(decode_row(self.table, &row)?),
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Copies a SQLite row into a [`RawRow`], keeping each value's storage class.
fn decode_row(table: Table, row: &SqliteRow) -> Result<RawRow, SourceError> {
    let mut raw = RawRow::with_capacity(row.len());
    for column in row.columns() {
        let value = decode_value(table, row, column.ordinal(), column.name())?;
        raw.push(column.name(), value);
    }
    Ok(raw)
}

fn decode_value(
    table: Table,
    row: &SqliteRow,
    index: usize,
    name: &str,
) -> Result<SourceValue, SourceError> {
    let query_error = |source| SourceError::Query { table, source };

    if row.try_get_raw(index).map_err(query_error)?.is_null() {
        return Ok(SourceValue::Null);
    }
    if let Ok(text) = row.try_get::<String, _>(index) {
        return Ok(SourceValue::Text(text));
    }
    if let Ok(integer) = row.try_get::<i64, _>(index) {
        return Ok(SourceValue::Integer(integer));
    }
    if let Ok(real) = row.try_get::<f64, _>(index) {
        return Ok(SourceValue::Real(real));
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(index) {
        return Ok(SourceValue::Blob(bytes));
    }

    let type_name = row
        .try_get_raw(index)
        .map(|value| value.type_info().to_string())
        .unwrap_or_default();
    Err(SourceError::UnsupportedValue {
        table,
        column: name.to_string(),
        type_name,
    })
}
