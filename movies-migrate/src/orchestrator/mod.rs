//! Drives the migration table by table.
//!
//! For each selected table, in load order: read batches from the source, map
//! every row onto its record type and hand it to the writer. Failures are
//! contained at the smallest scope that still makes sense:
//!
//! - a row that cannot be mapped or is rejected by the destination is logged
//!   and skipped;
//! - a table whose extraction fails is logged and marked failed, and every
//!   later table with a foreign key into it is skipped;
//! - only a writer failure that leaves the shared transaction unusable stops
//!   the run.
//!
//! The orchestrator never commits. Its caller owns the writer and commits once.
mod report;

pub use report::{MigrationReport, TableReport, TableStatus};

use movies_migrate_repository::{RecordWriter, SqliteSource, UpsertOutcome};
use movies_migrate_shared::{
    Filmwork, Genre, GenreFilmwork, Person, PersonFilmwork, Record, Table,
};
use tracing::{debug, error, info, instrument, warn};

use crate::errors::OrchestratorError;

pub struct Orchestrator<'a> {
    source: &'a SqliteSource,
    batch_size: usize,
    tables: Vec<Table>,
}

impl<'a> Orchestrator<'a> {
    /// `tables` is put in load order and deduplicated.
    pub fn new(source: &'a SqliteSource, batch_size: usize, tables: &[Table]) -> Self {
        let mut tables = tables.to_vec();
        tables.sort_by_key(Table::load_rank);
        tables.dedup();
        Self {
            source,
            batch_size,
            tables,
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Migrates every selected table through `writer`.
    ///
    /// # Returns
    ///
    /// * `Ok(MigrationReport)` - All tables were processed, possibly with
    ///   skipped rows or tables
    /// * `Err(OrchestratorError)` - The writer failed in a way that affects
    ///   the whole transaction; tables after the current one were not touched
    #[instrument(skip_all, fields(batch_size = self.batch_size))]
    pub async fn run<W: RecordWriter>(
        &self,
        writer: &mut W,
    ) -> Result<MigrationReport, OrchestratorError> {
        let mut report = MigrationReport::default();

        for &table in &self.tables {
            if let Some(parent) = report.failed_parent(table) {
                warn!(
                    table = %table,
                    parent = %parent,
                    "Skipping table because a table it references did not load"
                );
                report.push(TableReport::skipped(table, parent));
                continue;
            }

            info!(table = %table, "Migrating table");
            let table_report = self.migrate_table(table, writer).await?;
            info!(
                table = %table,
                read = table_report.read,
                inserted = table_report.inserted,
                already_present = table_report.already_present,
                failed = table_report.failed,
                status = ?table_report.status,
                "Finished table"
            );
            report.push(table_report);
        }

        Ok(report)
    }

    async fn migrate_table<W: RecordWriter>(
        &self,
        table: Table,
        writer: &mut W,
    ) -> Result<TableReport, OrchestratorError> {
        match table {
            Table::Genre => self.migrate::<Genre, W>(writer).await,
            Table::Person => self.migrate::<Person, W>(writer).await,
            Table::FilmWork => self.migrate::<Filmwork, W>(writer).await,
            Table::GenreFilmWork => self.migrate::<GenreFilmwork, W>(writer).await,
            Table::PersonFilmWork => self.migrate::<PersonFilmwork, W>(writer).await,
        }
    }

    async fn migrate<R: Record, W: RecordWriter>(
        &self,
        writer: &mut W,
    ) -> Result<TableReport, OrchestratorError> {
        let table = R::TABLE;
        let mut report = TableReport::new(table);

        let mut reader = match self.source.batches(table, self.batch_size) {
            Ok(reader) => reader,
            Err(e) => {
                error!(table = %table, error = %e, "Cannot read table");
                report.status = TableStatus::ExtractionFailed(e.to_string());
                return Ok(report);
            }
        };

        loop {
            let batch = match reader.next_batch().await {
                Ok(batch) if batch.is_empty() => break,
                Ok(batch) => batch,
                Err(e) => {
                    error!(table = %table, error = %e, "Cannot read table");
                    report.status = TableStatus::ExtractionFailed(e.to_string());
                    return Ok(report);
                }
            };
            debug!(table = %table, rows = batch.len(), "Read batch");

            for row in &batch {
                report.read += 1;

                let record = match R::from_row(row) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(
                            table = %table,
                            id = e.id().unwrap_or("unknown"),
                            error = %e,
                            "Skipping row that does not match its record"
                        );
                        report.failed += 1;
                        continue;
                    }
                };

                match writer.upsert(&record).await {
                    Ok(UpsertOutcome::Inserted) => report.inserted += 1,
                    Ok(UpsertOutcome::AlreadyPresent) => report.already_present += 1,
                    Err(e) if e.is_row_level() => {
                        error!(
                            table = %table,
                            id = %record.id(),
                            error = %e,
                            "Skipping row rejected by the destination"
                        );
                        report.failed += 1;
                    }
                    Err(source) => return Err(OrchestratorError::Writer { table, source }),
                }
            }
        }

        Ok(report)
    }
}
