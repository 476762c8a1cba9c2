//! Extraction queries, one per table.
//!
//! Each query renames source columns to destination field names and supplies
//! columns the source lacks, so the result set has exactly the fields of the
//! matching record type.
use movies_migrate_shared::Table;

use crate::errors::SourceError;

const GENRE: &str = "SELECT
    id,
    name,
    description,
    created_at created,
    updated_at modified
FROM genre";

const PERSON: &str = "SELECT
    id,
    full_name,
    created_at created,
    updated_at modified
FROM person";

// `certificate` has no source column.
const FILM_WORK: &str = "SELECT
    id,
    title,
    description,
    creation_date,
    rating,
    type,
    '' certificate,
    file_path,
    created_at created,
    updated_at modified
FROM film_work";

const GENRE_FILM_WORK: &str = "SELECT
    id,
    genre_id,
    film_work_id,
    created_at created
FROM genre_film_work";

const PERSON_FILM_WORK: &str = "SELECT
    id,
    person_id,
    film_work_id,
    role,
    created_at created
FROM person_film_work";

pub fn extraction_query(table: Table) -> &'static str {
    match table {
        Table::Genre => GENRE,
        Table::Person => PERSON,
        Table::FilmWork => FILM_WORK,
        Table::GenreFilmWork => GENRE_FILM_WORK,
        Table::PersonFilmWork => PERSON_FILM_WORK,
    }
}

/// Looks up the extraction query by table name.
pub fn query_for(name: &str) -> Result<&'static str, SourceError> {
    let table: Table = name.parse()?;
    Ok(extraction_query(table))
}
