use movies_migrate_shared::Table;
use serde::Serialize;

/// How processing of a table ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TableStatus {
    /// Every row was read; individual rows may still have failed.
    Completed,
    /// The extraction query could not be run or its stream broke off.
    ExtractionFailed(String),
    /// Not attempted because the named parent table did not load.
    SkippedParentFailed(Table),
}

impl TableStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TableStatus::Completed)
    }
}

/// Row counts for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    pub table: Table,
    pub read: u64,
    pub inserted: u64,
    pub already_present: u64,
    /// Rows skipped because they could not be mapped or were rejected by the
    /// destination.
    pub failed: u64,
    pub status: TableStatus,
}

impl TableReport {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            read: 0,
            inserted: 0,
            already_present: 0,
            failed: 0,
            status: TableStatus::Completed,
        }
    }

    pub fn skipped(table: Table, parent: Table) -> Self {
        Self {
            status: TableStatus::SkippedParentFailed(parent),
            ..Self::new(table)
        }
    }
}

/// Outcome of a migration run, one entry per processed table in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationReport {
    tables: Vec<TableReport>,
}

impl MigrationReport {
    pub fn push(&mut self, report: TableReport) {
        self.tables.push(report);
    }

    pub fn tables(&self) -> &[TableReport] {
        &self.tables
    }

    pub fn table(&self, table: Table) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    /// The first parent of `table` that was processed without completing.
    ///
    /// Parents left out of the run do not count.
    pub fn failed_parent(&self, table: Table) -> Option<Table> {
        table.parents().iter().copied().find(|parent| {
            self.table(*parent)
                .is_some_and(|report| !report.status.is_completed())
        })
    }

    pub fn read(&self) -> u64 {
        self.tables.iter().map(|report| report.read).sum()
    }

    pub fn inserted(&self) -> u64 {
        self.tables.iter().map(|report| report.inserted).sum()
    }

    pub fn already_present(&self) -> u64 {
        self.tables.iter().map(|report| report.already_present).sum()
    }

    pub fn failed(&self) -> u64 {
        self.tables.iter().map(|report| report.failed).sum()
    }

    /// Whether every table completed without a single failed row.
    pub fn is_clean(&self) -> bool {
        self.tables
            .iter()
            .all(|report| report.status.is_completed() && report.failed == 0)
    }
}
