use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Field, RawRow, Record, SqlValue, Table, ValueKind};
use crate::errors::MappingError;
use crate::mapper::RowReader;

/// Links a genre to a film work.
#[derive(Clone, Debug, PartialEq)]
pub struct GenreFilmwork {
    pub id: Uuid,
    pub genre_id: Uuid,
    pub film_work_id: Uuid,
    pub created: DateTime<Utc>,
}

impl Record for GenreFilmwork {
    const TABLE: Table = Table::GenreFilmWork;
    const FIELDS: &'static [Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("genre_id", ValueKind::Uuid),
        Field::new("film_work_id", ValueKind::Uuid),
        Field::new("created", ValueKind::Timestamp),
    ];

    fn from_row(row: &RawRow) -> Result<Self, MappingError> {
        let reader = RowReader::new(Self::TABLE, Self::FIELDS, row)?;
        Ok(Self {
            id: reader.uuid("id")?,
            genre_id: reader.uuid("genre_id")?,
            film_work_id: reader.uuid("film_work_id")?,
            created: reader.timestamp("created")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Uuid(self.id),
            SqlValue::Uuid(self.genre_id),
            SqlValue::Uuid(self.film_work_id),
            SqlValue::Timestamp(Some(self.created)),
        ]
    }

    fn parents(&self) -> Vec<(Table, Uuid)> {
        vec![
            (Table::Genre, self.genre_id),
            (Table::FilmWork, self.film_work_id),
        ]
    }
}
