//! # Movies Migrate
//!
//! Copies the movies catalogue (genres, persons, film works and the tables
//! linking them) from a SQLite file into a PostgreSQL schema.
//!
//! ## Modules
//!
//! - [`config`]: Settings read from the environment at startup
//! - [`orchestrator`]: Loads the tables in dependency order, one row at a time
//! - [`runner`]: Connects both stores, runs the orchestrator and commits once
//! - [`verifier`]: Compares source and destination row by row
//! - [`telemetry`]: Tracing setup shared by the binaries
//! - [`errors`]: Error types for the service
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod runner;
pub mod telemetry;
pub mod verifier;

pub use config::{MigrationConfig, MigrationSettings, PostgresSettings};
pub use errors::{ConfigError, MigrateError, OrchestratorError, VerifyError};
pub use orchestrator::{MigrationReport, Orchestrator, TableReport, TableStatus};
pub use runner::{migrate, migrate_with, run_migration};
pub use verifier::{compare_table, diff_source, verify, TableDiff, VerificationReport};
