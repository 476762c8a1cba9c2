//! Error types for the migration service.
use movies_migrate_repository::{DestinationError, SourceError, WriterError};
use movies_migrate_shared::{Table, UnknownTable};
use thiserror::Error;

/// Invalid or missing settings. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is not a valid number ({value:?}): {reason}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("batch size {value} is outside {min}..={max}")]
    BatchSizeOutOfRange { value: usize, min: usize, max: usize },

    #[error("invalid schema name {0:?}")]
    InvalidSchema(String),

    #[error(transparent)]
    UnknownTable(#[from] UnknownTable),
}

/// Errors that stop the orchestrator before every table was processed.
///
/// Row and table failures never show up here; they are logged and counted
/// in the report.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("writer failed while loading {table}: {source}")]
    Writer {
        table: Table,
        #[source]
        source: WriterError,
    },
}

/// Errors that prevent a comparison from being made at all.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Destination(#[from] DestinationError),
}

/// Top-level error returned by the binaries.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Destination error: {0}")]
    Writer(#[from] WriterError),

    #[error("Migration error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    #[error("Verification error: {0}")]
    Verify(#[from] VerifyError),

    #[error("Source and destination differ in {0} place(s)")]
    Inconsistent(usize),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
