//! Integration tests for the PostgreSQL record writer.
//!
//! These tests require a real PostgreSQL database (`DATABASE_URL`) and use
//! SQLx test macros for isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_writer -- --ignored`

use chrono::{TimeZone, Utc};
use movies_migrate_repository::{read_rows, PostgresRecordWriter, RecordWriter, UpsertOutcome, WriterError};
use movies_migrate_shared::{Filmwork, FilmworkType, Genre, GenreFilmwork, Record, SqlValue, Table};
use uuid::Uuid;

fn make_genre(name: &str) -> Genre {
    let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    Genre {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(String::new()),
        created: at,
        modified: at,
    }
}

fn make_film_work() -> Filmwork {
    let at = Utc.with_ymd_and_hms(2021, 6, 16, 20, 14, 9).unwrap();
    Filmwork {
        id: Uuid::new_v4(),
        title: "Star Wars".to_string(),
        description: None,
        creation_date: None,
        rating: None,
        kind: FilmworkType::Movie,
        certificate: String::new(),
        file_path: None,
        created: at,
        modified: at,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_second_insert_of_same_id_is_skipped(pool: sqlx::PgPool) {
    let genre = make_genre("Drama");
    let mut writer = PostgresRecordWriter::begin(&pool, "content").await.unwrap();

    assert_eq!(writer.upsert(&genre).await.unwrap(), UpsertOutcome::Inserted);

    let mut renamed = genre.clone();
    renamed.name = "Comedy".to_string();
    assert_eq!(writer.upsert(&renamed).await.unwrap(), UpsertOutcome::AlreadyPresent);
    writer.commit().await.unwrap();

    let rows = read_rows(&pool, "content", Table::Genre, Genre::FIELDS).await.unwrap();
    assert_eq!(rows, vec![genre.values()]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_rejected_row_keeps_transaction_usable(pool: sqlx::PgPool) {
    let genre = make_genre("Drama");
    let film_work = make_film_work();
    let orphan = GenreFilmwork {
        id: Uuid::new_v4(),
        genre_id: genre.id,
        film_work_id: Uuid::new_v4(),
        created: genre.created,
    };

    let mut writer = PostgresRecordWriter::begin(&pool, "content").await.unwrap();
    writer.upsert(&genre).await.unwrap();

    let rejected = writer.upsert(&orphan).await;
    assert!(matches!(
        rejected,
        Err(WriterError::Rejected { table: Table::GenreFilmWork, id, .. }) if id == orphan.id
    ));

    assert_eq!(writer.upsert(&film_work).await.unwrap(), UpsertOutcome::Inserted);
    writer.commit().await.unwrap();

    let genres = read_rows(&pool, "content", Table::Genre, Genre::FIELDS).await.unwrap();
    let links = read_rows(&pool, "content", Table::GenreFilmWork, GenreFilmwork::FIELDS).await.unwrap();
    let films = read_rows(&pool, "content", Table::FilmWork, Filmwork::FIELDS).await.unwrap();
    assert_eq!(genres.len(), 1);
    assert!(links.is_empty());
    assert_eq!(films, vec![film_work.values()]);
    assert_eq!(films[0][4], SqlValue::Float(None));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_nothing_is_visible_before_commit(pool: sqlx::PgPool) {
    let mut writer = PostgresRecordWriter::begin(&pool, "content").await.unwrap();
    writer.upsert(&make_genre("Drama")).await.unwrap();
    writer.rollback().await.unwrap();

    let genres = read_rows(&pool, "content", Table::Genre, Genre::FIELDS).await.unwrap();
    assert!(genres.is_empty());
}
