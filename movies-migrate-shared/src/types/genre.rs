use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Field, RawRow, Record, SqlValue, Table, ValueKind};
use crate::errors::MappingError;
use crate::mapper::RowReader;

/// A film genre.
#[derive(Clone, Debug, PartialEq)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Record for Genre {
    const TABLE: Table = Table::Genre;
    const FIELDS: &'static [Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("name", ValueKind::Text),
        Field::new("description", ValueKind::Text),
        Field::new("created", ValueKind::Timestamp),
        Field::new("modified", ValueKind::Timestamp),
    ];

    fn from_row(row: &RawRow) -> Result<Self, MappingError> {
        let reader = RowReader::new(Self::TABLE, Self::FIELDS, row)?;
        Ok(Self {
            id: reader.uuid("id")?,
            name: reader.text("name")?,
            description: reader.optional_text("description")?,
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
            SqlValue::Text(Some(self.name.clone())),
            SqlValue::Text(self.description.clone()),
            SqlValue::Timestamp(Some(self.created)),
            SqlValue::Timestamp(Some(self.modified)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceValue;
    use chrono::TimeZone;

    fn text(value: &str) -> SourceValue {
        SourceValue::Text(value.to_string())
    }

    #[test]
    fn maps_a_source_row() {
        let row = RawRow::new()
            .with("id", text("3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff"))
            .with("name", text("Drama"))
            .with("description", text(""))
            .with("created", text("2020-01-01 00:00:00.000000"))
            .with("modified", text("2020-01-01 00:00:00.000000"));

        let genre = Genre::from_row(&row).unwrap();
        let midnight = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            genre,
            Genre {
                id: Uuid::parse_str("3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff").unwrap(),
                name: "Drama".to_string(),
                description: Some(String::new()),
                created: midnight,
                modified: midnight,
            }
        );
        assert_eq!(genre.values().len(), Genre::FIELDS.len());
    }

    #[test]
    fn source_column_names_are_not_accepted() {
        let row = RawRow::new()
            .with("id", text("3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff"))
            .with("name", text("Drama"))
            .with("description", SourceValue::Null)
            .with("created_at", text("2020-01-01 00:00:00"))
            .with("updated_at", text("2020-01-01 00:00:00"));

        assert!(matches!(
            Genre::from_row(&row),
            Err(MappingError::SchemaMismatch { .. })
        ));
    }
}
