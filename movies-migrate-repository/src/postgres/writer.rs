//! Idempotent inserts into the destination, one savepoint per row.
use movies_migrate_shared::{Field, Record, SqlValue, Table};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Acquire, PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::errors::WriterError;
use crate::interfaces::{RecordWriter, UpsertOutcome};

/// Writes records into `<schema>.<table>` inside one transaction.
///
/// Every statement runs under its own savepoint. PostgreSQL aborts the whole
/// transaction on the first failed statement, so a rejected row has to be
/// rolled back to its savepoint for the rows after it to go through.
pub struct PostgresRecordWriter {
    tx: Transaction<'static, Postgres>,
    schema: String,
    statements: HashMap<Table, String>,
}

impl PostgresRecordWriter {
    /// Opens the transaction every later upsert joins.
    pub async fn begin(pool: &PgPool, schema: impl Into<String>) -> Result<Self, WriterError> {
        let tx = pool.begin().await.map_err(WriterError::Transaction)?;
        Ok(Self {
            tx,
            schema: schema.into(),
            statements: HashMap::new(),
        })
    }

    pub async fn rollback(self) -> Result<(), WriterError> {
        self.tx.rollback().await.map_err(WriterError::Transaction)
    }
}

#[async_trait::async_trait]
impl RecordWriter for PostgresRecordWriter {
    async fn upsert<R: Record>(&mut self, record: &R) -> Result<UpsertOutcome, WriterError> {
        let schema = &self.schema;
        let statement = self
            .statements
            .entry(R::TABLE)
            .or_insert_with(|| upsert_statement(schema, R::TABLE, R::FIELDS));

        let query = record
            .values()
            .into_iter()
            .fold(sqlx::query(statement.as_str()), bind_value);

        let mut savepoint = Acquire::begin(&mut self.tx).await.map_err(WriterError::Transaction)?;
        match query.execute(&mut *savepoint).await {
            Ok(done) => {
                savepoint.commit().await.map_err(WriterError::Transaction)?;
                Ok(if done.rows_affected() == 0 {
                    UpsertOutcome::AlreadyPresent
                } else {
                    UpsertOutcome::Inserted
                })
            }
            Err(source) => {
                savepoint.rollback().await.map_err(WriterError::Transaction)?;
                Err(WriterError::Rejected {
                    table: R::TABLE,
                    id: record.id(),
                    source,
                })
            }
        }
    }

    async fn commit(self) -> Result<(), WriterError> {
        self.tx.commit().await.map_err(WriterError::Commit)
    }
}

/// Builds the insert-or-skip statement for a table from its field list.
pub fn upsert_statement(schema: &str, table: Table, fields: &[Field]) -> String {
    let columns = fields
        .iter()
        .map(|field| quote_ident(field.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=fields.len())
        .map(|position| format!("${position}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {}.{} ({columns}) VALUES ({placeholders}) ON CONFLICT (id) DO NOTHING",
        quote_ident(schema),
        quote_ident(table.name()),
    )
}

/// Quotes an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Uuid(id) => query.bind(id),
        SqlValue::Text(text) => query.bind(text),
        SqlValue::Float(number) => query.bind(number),
        SqlValue::Timestamp(at) => query.bind(at),
    }
}
