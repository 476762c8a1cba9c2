//! Shared fixtures: an in-memory SQLite source and an in-memory writer that
//! behaves like the destination (insert-or-skip by id, foreign key checks).
#![allow(dead_code)]

use movies_migrate::verifier::{diff_source, RowSet, TableDiff};
use movies_migrate_repository::{RecordWriter, SqliteSource, UpsertOutcome, WriterError};
use movies_migrate_shared::{Record, Table};
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const SOURCE_SCHEMA: &str = include_str!("../fixtures/sqlite_schema.sql");
pub const SEED: &str = include_str!("../fixtures/seed.sql");

/// Row counts of the seed data, in load order.
pub const SEED_COUNTS: [(Table, usize); 5] = [
    (Table::Genre, 3),
    (Table::Person, 2),
    (Table::FilmWork, 3),
    (Table::GenreFilmWork, 4),
    (Table::PersonFilmWork, 4),
];

pub const EPISODE_V: &str = "0312ed51-8833-413f-bff5-0e139c11264a";

/// A source with the tables created and no rows.
pub async fn empty_source() -> SqliteSource {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(SOURCE_SCHEMA).execute(&pool).await.unwrap();
    SqliteSource::from_pool(pool)
}

pub async fn seeded_source() -> SqliteSource {
    let source = empty_source().await;
    execute(&source, SEED).await;
    source
}

pub async fn execute(source: &SqliteSource, sql: &str) {
    sqlx::raw_sql(sql).execute(source.pool()).await.unwrap();
}

pub fn id(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap()
}

/// In-memory destination.
#[derive(Default)]
pub struct MemoryWriter {
    pub rows: BTreeMap<Table, RowSet>,
    /// Successful inserts in the order they happened.
    pub log: Vec<(Table, Uuid)>,
    /// Ids the writer refuses, as if the destination raised an error.
    pub reject: HashSet<Uuid>,
    /// Table on which the writer fails as if the transaction broke.
    pub break_on: Option<Table>,
    /// Makes `commit` fail.
    pub fail_commit: bool,
    /// What `commit` left behind. `None` until a commit succeeds.
    pub committed: Committed,
}

pub type Committed = Arc<Mutex<Option<BTreeMap<Table, RowSet>>>>;

impl MemoryWriter {
    pub fn rows(&self, table: Table) -> RowSet {
        self.rows.get(&table).cloned().unwrap_or_default()
    }

    pub fn count(&self, table: Table) -> usize {
        self.rows.get(&table).map_or(0, BTreeMap::len)
    }

    fn rejected<R: Record>(id: Uuid, reason: String) -> WriterError {
        WriterError::Rejected {
            table: R::TABLE,
            id,
            source: sqlx::Error::Protocol(reason),
        }
    }
}

#[async_trait::async_trait]
impl RecordWriter for MemoryWriter {
    async fn upsert<R: Record>(&mut self, record: &R) -> Result<UpsertOutcome, WriterError> {
        let id = record.id();

        if self.break_on == Some(R::TABLE) {
            return Err(WriterError::Transaction(sqlx::Error::PoolClosed));
        }
        if self.reject.contains(&id) {
            return Err(Self::rejected::<R>(id, "injected failure".to_string()));
        }
        for (parent, parent_id) in record.parents() {
            let exists = self
                .rows
                .get(&parent)
                .is_some_and(|rows| rows.contains_key(&parent_id));
            if !exists {
                return Err(Self::rejected::<R>(
                    id,
                    format!("foreign key violation: {parent} {parent_id} does not exist"),
                ));
            }
        }

        let rows = self.rows.entry(R::TABLE).or_default();
        if rows.contains_key(&id) {
            return Ok(UpsertOutcome::AlreadyPresent);
        }
        rows.insert(id, record.values());
        self.log.push((R::TABLE, id));
        Ok(UpsertOutcome::Inserted)
    }

    async fn commit(self) -> Result<(), WriterError> {
        if self.fail_commit {
            return Err(WriterError::Commit(sqlx::Error::PoolClosed));
        }
        *self.committed.lock().unwrap() = Some(self.rows);
        Ok(())
    }
}

/// Compares a source table with what the writer holds.
pub async fn diff<R: Record>(source: &SqliteSource, writer: &MemoryWriter) -> TableDiff {
    diff_source::<R>(source, &writer.rows(R::TABLE)).await.unwrap()
}
