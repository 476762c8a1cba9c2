//! Runs the SQLite to PostgreSQL migration once and exits.
//!
//! Exits non-zero when a store cannot be reached, the run has to stop early,
//! or the final commit fails. Skipped rows and tables are only logged.
use dotenv::dotenv;
use movies_migrate::telemetry::{init_tracing, LogFormat};
use movies_migrate::{run_migration, MigrateError, MigrationConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), MigrateError> {
    dotenv().ok();
    init_tracing("movies-migrate", LogFormat::from_env())?;

    let config = match MigrationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    info!(
        sqlite = %config.sqlite_path.display(),
        schema = %config.migration.schema,
        batch_size = config.migration.batch_size,
        tables = ?config.migration.tables,
        "Starting migration"
    );

    match run_migration(&config).await {
        Ok(report) => {
            if report.is_clean() {
                info!("Migration completed");
            } else {
                info!(
                    failed_rows = report.failed(),
                    "Migration completed with skipped rows or tables, see the log above"
                );
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Migration failed");
            Err(e)
        }
    }
}
