use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Field, RawRow, Record, SqlValue, Table, ValueKind};
use crate::errors::MappingError;
use crate::mapper::RowReader;

pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 100.0;

/// Kind of a film work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilmworkType {
    Movie,
    TvShow,
}

impl FilmworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmworkType::Movie => "movie",
            FilmworkType::TvShow => "tv_show",
        }
    }
}

impl fmt::Display for FilmworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilmworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(FilmworkType::Movie),
            "tv_show" => Ok(FilmworkType::TvShow),
            other => Err(format!("expected movie or tv_show, got {other:?}")),
        }
    }
}

/// A movie or TV show.
///
/// `certificate` does not exist at the source; the extraction query supplies
/// an empty string for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Filmwork {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub rating: Option<f64>,
    pub kind: FilmworkType,
    pub certificate: String,
    pub file_path: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Record for Filmwork {
    const TABLE: Table = Table::FilmWork;
    const FIELDS: &'static [Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("title", ValueKind::Text),
        Field::new("description", ValueKind::Text),
        Field::new("creation_date", ValueKind::Timestamp),
        Field::new("rating", ValueKind::Float),
        Field::new("type", ValueKind::Text),
        Field::new("certificate", ValueKind::Text),
        Field::new("file_path", ValueKind::Text),
        Field::new("created", ValueKind::Timestamp),
        Field::new("modified", ValueKind::Timestamp),
    ];

    fn from_row(row: &RawRow) -> Result<Self, MappingError> {
        let reader = RowReader::new(Self::TABLE, Self::FIELDS, row)?;
        Ok(Self {
            id: reader.uuid("id")?,
            title: reader.text("title")?,
            description: reader.optional_text("description")?,
            creation_date: reader.optional_timestamp("creation_date")?,
            rating: reader.optional_float_within("rating", RATING_MIN, RATING_MAX)?,
            kind: reader.parsed("type", FilmworkType::from_str)?,
            certificate: reader.text("certificate")?,
            file_path: reader.optional_text("file_path")?,
            created: reader.timestamp("created")?,
            modified: reader.timestamp("modified")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Uuid(self.id),
            SqlValue::Text(Some(self.title.clone())),
            SqlValue::Text(self.description.clone()),
            SqlValue::Timestamp(self.creation_date),
            SqlValue::Float(self.rating),
            SqlValue::Text(Some(self.kind.as_str().to_string())),
            SqlValue::Text(Some(self.certificate.clone())),
            SqlValue::Text(self.file_path.clone()),
            SqlValue::Timestamp(Some(self.created)),
            SqlValue::Timestamp(Some(self.modified)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceValue;

    fn text(value: &str) -> SourceValue {
        SourceValue::Text(value.to_string())
    }

    fn row(rating: SourceValue, kind: &str) -> RawRow {
        RawRow::new()
            .with("id", text("1c0bc5fa-9c8f-4de2-a1a4-6e6f93a3f0a1"))
            .with("title", text("Star Wars"))
            .with("description", SourceValue::Null)
            .with("creation_date", SourceValue::Null)
            .with("file_path", SourceValue::Null)
            .with("rating", rating)
            .with("type", text(kind))
            .with("certificate", text(""))
            .with("created", text("2021-06-16 20:14:09.221838+00"))
            .with("modified", text("2021-06-16 20:14:09.221838+00"))
    }

    #[test]
    fn null_rating_is_not_a_range_error() {
        let film = Filmwork::from_row(&row(SourceValue::Null, "movie")).unwrap();
        assert_eq!(film.rating, None);
        assert_eq!(film.values()[4], SqlValue::Float(None));
    }

    #[test]
    fn rating_above_hundred_is_rejected() {
        assert!(matches!(
            Filmwork::from_row(&row(SourceValue::Real(100.1), "movie")),
            Err(MappingError::OutOfRange { field: "rating", .. })
        ));
    }

    #[test]
    fn parses_type_and_keeps_field_order() {
        let film = Filmwork::from_row(&row(SourceValue::Real(8.6), "tv_show")).unwrap();
        assert_eq!(film.kind, FilmworkType::TvShow);

        let values = film.values();
        assert_eq!(values.len(), Filmwork::FIELDS.len());
        for (value, field) in values.iter().zip(Filmwork::FIELDS) {
            assert_eq!(value.kind(), field.kind, "{}", field.name);
        }
        assert_eq!(values[5], SqlValue::Text(Some("tv_show".to_string())));
    }

    #[test]
    fn unknown_type_is_invalid() {
        assert!(matches!(
            Filmwork::from_row(&row(SourceValue::Null, "cartoon")),
            Err(MappingError::InvalidValue { field: "type", .. })
        ));
    }
}
