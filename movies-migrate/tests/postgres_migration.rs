//! End-to-end runs into a real PostgreSQL database.
//!
//! These tests require `DATABASE_URL` and use SQLx test macros to get a
//! scratch database with the destination schema applied.
//!
//! Run with: `cargo test --test postgres_migration -- --ignored`
mod common;

use common::{execute, seeded_source, SEED_COUNTS};
use movies_migrate::{migrate, verify, MigrationSettings};
use movies_migrate_repository::count_rows;
use movies_migrate_shared::Table;

#[sqlx::test(migrations = "../movies-migrate-repository/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_migration_is_consistent_and_repeatable(pool: sqlx::PgPool) {
    let source = seeded_source().await;
    let settings = MigrationSettings::default();

    let first = migrate(&source, &pool, &settings).await.unwrap();
    assert!(first.is_clean());
    assert_eq!(first.inserted(), 16);

    let second = migrate(&source, &pool, &settings).await.unwrap();
    assert_eq!(second.inserted(), 0);
    assert_eq!(second.already_present(), 16);

    for (table, count) in SEED_COUNTS {
        assert_eq!(count_rows(&pool, "content", table).await.unwrap(), count as i64);
    }

    let report = verify(&source, &pool, "content", &Table::LOAD_ORDER).await.unwrap();
    assert!(report.is_consistent(), "{report:?}");
}

#[sqlx::test(migrations = "../movies-migrate-repository/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_orphan_credit_is_skipped_and_the_rest_committed(pool: sqlx::PgPool) {
    let source = seeded_source().await;
    execute(
        &source,
        "INSERT INTO person_film_work (id, film_work_id, person_id, role, created_at) VALUES (
            'b0c1d2e3-0000-4000-8000-0000000000ff', '99999999-9999-4999-8999-999999999999',
            '26e83050-29ef-4163-a99d-b546cac208f8', 'director', '2021-06-16 20:14:09')",
    )
    .await;

    let report = migrate(&source, &pool, &MigrationSettings::default()).await.unwrap();
    assert_eq!(report.table(Table::PersonFilmWork).unwrap().failed, 1);

    for (table, count) in SEED_COUNTS {
        assert_eq!(count_rows(&pool, "content", table).await.unwrap(), count as i64);
    }

    let verification = verify(&source, &pool, "content", &Table::LOAD_ORDER).await.unwrap();
    let credits = verification
        .tables
        .iter()
        .find(|diff| diff.table == Table::PersonFilmWork)
        .unwrap();
    assert_eq!(credits.missing.len(), 1);
    assert!(!verification.is_consistent());
}
