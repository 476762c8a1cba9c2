//! Top-level migration run: connect, migrate, commit once, close.
use movies_migrate_repository::{connect, PostgresRecordWriter, RecordWriter, SqliteSource};
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::{MigrationConfig, MigrationSettings};
use crate::errors::MigrateError;
use crate::orchestrator::{MigrationReport, Orchestrator};

/// Runs a full migration with the stores named in `config`.
///
/// Both pools are closed before returning, whatever the outcome.
pub async fn run_migration(config: &MigrationConfig) -> Result<MigrationReport, MigrateError> {
    let source = SqliteSource::open(&config.sqlite_path).await?;
    info!(path = %config.sqlite_path.display(), "Connected to source");

    let pool = match connect(config.postgres.connect_options()).await {
        Ok(pool) => pool,
        Err(e) => {
            source.close().await;
            return Err(e.into());
        }
    };
    info!(
        host = %config.postgres.host,
        port = config.postgres.port,
        database = %config.postgres.database,
        "Connected to destination"
    );

    let result = migrate(&source, &pool, &config.migration).await;

    source.close().await;
    pool.close().await;
    result
}

/// Migrates `source` into `pool` inside one transaction and commits it.
pub async fn migrate(
    source: &SqliteSource,
    pool: &PgPool,
    settings: &MigrationSettings,
) -> Result<MigrationReport, MigrateError> {
    let writer = PostgresRecordWriter::begin(pool, settings.schema.clone()).await?;
    migrate_with(source, writer, settings).await
}

/// Runs the orchestrator through `writer`, then commits it.
///
/// The commit is attempted even when the orchestrator stops early, so rows
/// written before the failure are kept. Re-running is safe because existing
/// ids are skipped. The orchestrator's error takes precedence over a failed
/// commit.
pub async fn migrate_with<W: RecordWriter>(
    source: &SqliteSource,
    mut writer: W,
    settings: &MigrationSettings,
) -> Result<MigrationReport, MigrateError> {
    let orchestrator = Orchestrator::new(source, settings.batch_size, &settings.tables);

    let outcome = orchestrator.run(&mut writer).await;
    if let Err(e) = &outcome {
        error!(error = %e, "Migration stopped early, committing rows written so far");
    }

    match (outcome, writer.commit().await) {
        (Ok(report), Ok(())) => {
            info!(
                read = report.read(),
                inserted = report.inserted(),
                already_present = report.already_present(),
                failed = report.failed(),
                "Migration committed"
            );
            Ok(report)
        }
        (Ok(_), Err(e)) => {
            error!(error = %e, "Commit failed");
            Err(e.into())
        }
        (Err(e), Ok(())) => Err(e.into()),
        (Err(e), Err(commit_error)) => {
            error!(error = %commit_error, "Commit failed");
            Err(e.into())
        }
    }
}
