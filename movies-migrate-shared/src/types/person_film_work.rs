use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Field, RawRow, Record, SqlValue, Table, ValueKind};
use crate::errors::MappingError;
use crate::mapper::RowReader;

/// Credits a person on a film work, with an optional role.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonFilmwork {
    pub id: Uuid,
    pub person_id: Uuid,
    pub film_work_id: Uuid,
    pub role: Option<String>,
    pub created: DateTime<Utc>,
}

impl Record for PersonFilmwork {
    const TABLE: Table = Table::PersonFilmWork;
    const FIELDS: &'static [Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("person_id", ValueKind::Uuid),
        Field::new("film_work_id", ValueKind::Uuid),
        Field::new("role", ValueKind::Text),
        Field::new("created", ValueKind::Timestamp),
    ];

    fn from_row(row: &RawRow) -> Result<Self, MappingError> {
        let reader = RowReader::new(Self::TABLE, Self::FIELDS, row)?;
        Ok(Self {
            id: reader.uuid("id")?,
            person_id: reader.uuid("person_id")?,
            film_work_id: reader.uuid("film_work_id")?,
            role: reader.optional_text("role")?,
            created: reader.timestamp("created")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Uuid(self.id),
            SqlValue::Uuid(self.person_id),
            SqlValue::Uuid(self.film_work_id),
            SqlValue::Text(self.role.clone()),
            SqlValue::Timestamp(Some(self.created)),
        ]
    }

    fn parents(&self) -> Vec<(Table, Uuid)> {
        vec![
            (Table::Person, self.person_id),
            (Table::FilmWork, self.film_work_id),
        ]
    }
}
