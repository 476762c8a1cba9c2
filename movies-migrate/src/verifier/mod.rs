//! Consistency check between source and destination.
//!
//! Both stores are read independently of the migration: the source through
//! its extraction queries and the row mapper, so timestamps come out in UTC,
//! and the destination by selecting each record's fields directly.
use movies_migrate_repository::{read_rows, SqliteSource};
use movies_migrate_shared::{
    Field, Filmwork, Genre, GenreFilmwork, Person, PersonFilmwork, Record, SqlValue, Table,
};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::VerifyError;

/// Rows of one table keyed by id, values in field order.
pub type RowSet = BTreeMap<Uuid, Vec<SqlValue>>;

const READ_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub id: Uuid,
    pub field: &'static str,
    pub source: String,
    pub destination: String,
}

/// Differences found in one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDiff {
    pub table: Table,
    /// Rows in the source table, mapped or not.
    pub source_count: usize,
    pub destination_count: usize,
    /// Source rows that could not be mapped. They are counted in
    /// `source_count` but left out of the field comparison.
    pub unmapped: usize,
    /// In the source but not in the destination.
    pub missing: Vec<Uuid>,
    /// In the destination but not in the source.
    pub unexpected: Vec<Uuid>,
    pub mismatches: Vec<FieldMismatch>,
}

impl TableDiff {
    pub fn is_consistent(&self) -> bool {
        self.source_count == self.destination_count
            && self.unmapped == 0
            && self.missing.is_empty()
            && self.unexpected.is_empty()
            && self.mismatches.is_empty()
    }

    pub fn discrepancies(&self) -> usize {
        self.unmapped + self.missing.len() + self.unexpected.len() + self.mismatches.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationReport {
    pub tables: Vec<TableDiff>,
}

impl VerificationReport {
    pub fn is_consistent(&self) -> bool {
        self.tables.iter().all(TableDiff::is_consistent)
    }

    pub fn discrepancies(&self) -> usize {
        self.tables.iter().map(TableDiff::discrepancies).sum()
    }
}

/// Compares two row sets of `table` field by field.
pub fn compare_table(table: Table, fields: &[Field], source: &RowSet, destination: &RowSet) -> TableDiff {
    let missing = source
        .keys()
        .filter(|id| !destination.contains_key(id))
        .copied()
        .collect();
    let unexpected = destination
        .keys()
        .filter(|id| !source.contains_key(id))
        .copied()
        .collect();

    let mut mismatches = Vec::new();
    for (id, source_values) in source {
        let Some(destination_values) = destination.get(id) else {
            continue;
        };
        for (index, field) in fields.iter().enumerate() {
            let left = source_values.get(index);
            let right = destination_values.get(index);
            if left != right {
                mismatches.push(FieldMismatch {
                    id: *id,
                    field: field.name,
                    source: display(left),
                    destination: display(right),
                });
            }
        }
    }

    TableDiff {
        table,
        source_count: source.len(),
        destination_count: destination.len(),
        unmapped: 0,
        missing,
        unexpected,
        mismatches,
    }
}

fn display(value: Option<&SqlValue>) -> String {
    value.map_or_else(|| "<absent>".to_string(), SqlValue::to_string)
}

/// Reads a source table through the mapper.
///
/// Returns the mapped rows and the number of rows that failed to map.
pub async fn read_source<R: Record>(source: &SqliteSource) -> Result<(RowSet, usize), VerifyError> {
    let mut rows = RowSet::new();
    let mut unmapped = 0;

    let mut reader = source.batches(R::TABLE, READ_BATCH_SIZE)?;
    loop {
        let batch = reader.next_batch().await?;
        if batch.is_empty() {
            break;
        }
        for row in &batch {
            match R::from_row(row) {
                Ok(record) => {
                    rows.insert(record.id(), record.values());
                }
                Err(e) => {
                    warn!(table = %R::TABLE, error = %e, "Source row does not map onto its record");
                    unmapped += 1;
                }
            }
        }
    }

    Ok((rows, unmapped))
}

/// Compares a source table with `destination`.
///
/// `source_count` is the raw row count of the source table, so rows the
/// mapper rejects still show up as a count difference.
pub async fn diff_source<R: Record>(
    source: &SqliteSource,
    destination: &RowSet,
) -> Result<TableDiff, VerifyError> {
    let total = source.count(R::TABLE).await?;
    let (source_rows, unmapped) = read_source::<R>(source).await?;

    Ok(TableDiff {
        source_count: usize::try_from(total).unwrap_or_default(),
        unmapped,
        ..compare_table(R::TABLE, R::FIELDS, &source_rows, destination)
    })
}

/// Reads a destination table, keyed by the leading id column.
pub async fn read_destination<R: Record>(pool: &PgPool, schema: &str) -> Result<RowSet, VerifyError> {
    let rows = read_rows(pool, schema, R::TABLE, R::FIELDS).await?;
    Ok(rows
        .into_iter()
        .filter_map(|values| match values.first() {
            Some(SqlValue::Uuid(id)) => Some((*id, values)),
            _ => None,
        })
        .collect())
}

async fn verify_table<R: Record>(
    source: &SqliteSource,
    pool: &PgPool,
    schema: &str,
) -> Result<TableDiff, VerifyError> {
    let destination_rows = read_destination::<R>(pool, schema).await?;
    let diff = diff_source::<R>(source, &destination_rows).await?;
    info!(
        table = %R::TABLE,
        source_count = diff.source_count,
        destination_count = diff.destination_count,
        unmapped = diff.unmapped,
        discrepancies = diff.discrepancies(),
        "Verified table"
    );
    Ok(diff)
}

/// Compares every table in `tables` between the two stores.
pub async fn verify(
    source: &SqliteSource,
    pool: &PgPool,
    schema: &str,
    tables: &[Table],
) -> Result<VerificationReport, VerifyError> {
    let mut report = VerificationReport::default();
    for &table in tables {
        let diff = match table {
            Table::Genre => verify_table::<Genre>(source, pool, schema).await?,
            Table::Person => verify_table::<Person>(source, pool, schema).await?,
            Table::FilmWork => verify_table::<Filmwork>(source, pool, schema).await?,
            Table::GenreFilmWork => verify_table::<GenreFilmwork>(source, pool, schema).await?,
            Table::PersonFilmWork => verify_table::<PersonFilmwork>(source, pool, schema).await?,
        };
        report.tables.push(diff);
    }
    Ok(report)
}
