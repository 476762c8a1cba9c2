//! Reads migrated rows back from the destination.
use movies_migrate_shared::{Field, SqlValue, Table, ValueKind};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::writer::quote_ident;
use crate::errors::DestinationError;

/// Reads every row of `<schema>.<table>`, decoding `fields` in order.
pub async fn read_rows(
    pool: &PgPool,
    schema: &str,
    table: Table,
    fields: &[Field],
) -> Result<Vec<Vec<SqlValue>>, DestinationError> {
    let columns = fields
        .iter()
        .map(|field| quote_ident(field.name))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!(
        "SELECT {columns} FROM {}.{} ORDER BY id",
        quote_ident(schema),
        quote_ident(table.name())
    );

    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .map_err(|source| DestinationError::Query { table, source })?;

    rows.iter()
        .map(|row| decode_row(row, fields))
        .collect::<Result<_, _>>()
        .map_err(|source| DestinationError::Query { table, source })
}

pub async fn count_rows(pool: &PgPool, schema: &str, table: Table) -> Result<i64, DestinationError> {
    let query = format!(
        "SELECT COUNT(*) AS total FROM {}.{}",
        quote_ident(schema),
        quote_ident(table.name())
    );
    sqlx::query(&query)
        .fetch_one(pool)
        .await
        .and_then(|row| row.try_get("total"))
        .map_err(|source| DestinationError::Query { table, source })
}

fn decode_row(row: &PgRow, fields: &[Field]) -> Result<Vec<SqlValue>, sqlx::Error> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| -> Result<SqlValue, sqlx::Error> {
            Ok(match field.kind {
                ValueKind::Uuid => SqlValue::Uuid(row.try_get::<Uuid, _>(index)?),
                ValueKind::Text => SqlValue::Text(row.try_get(index)?),
                ValueKind::Float => SqlValue::Float(row.try_get(index)?),
                ValueKind::Timestamp => SqlValue::Timestamp(row.try_get(index)?),
            })
        })
        .collect()
}
