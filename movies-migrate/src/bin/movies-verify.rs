//! Compares the SQLite source with the PostgreSQL destination.
//!
//! Prints a JSON report to stdout and exits non-zero when any table differs.
use dotenv::dotenv;
use movies_migrate::telemetry::{init_tracing, LogFormat};
use movies_migrate::{verify, MigrateError, MigrationConfig};
use movies_migrate_repository::{connect, SqliteSource};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), MigrateError> {
    dotenv().ok();
    init_tracing("movies-verify", LogFormat::from_env())?;

    let config = MigrationConfig::from_env()?;
    let source = SqliteSource::open(&config.sqlite_path).await?;
    let pool = match connect(config.postgres.connect_options()).await {
        Ok(pool) => pool,
        Err(e) => {
            source.close().await;
            return Err(e.into());
        }
    };

    let result = verify(
        &source,
        &pool,
        &config.migration.schema,
        &config.migration.tables,
    )
    .await;

    source.close().await;
    pool.close().await;

    let report = result?;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Failed to render report"),
    }

    if report.is_consistent() {
        info!("Source and destination match");
        Ok(())
    } else {
        let discrepancies = report.discrepancies();
        error!(discrepancies, "Source and destination differ");
        Err(MigrateError::Inconsistent(discrepancies))
    }
}
