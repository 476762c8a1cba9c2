use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Field, RawRow, Record, SqlValue, Table, ValueKind};
use crate::errors::MappingError;
use crate::mapper::RowReader;

/// A person credited on film works.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub full_name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Record for Person {
    const TABLE: Table = Table::Person;
    const FIELDS: &'static [Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("full_name", ValueKind::Text),
        Field::new("created", ValueKind::Timestamp),
        Field::new("modified", ValueKind::Timestamp),
    ];

    fn from_row(row: &RawRow) -> Result<Self, MappingError> {
        let reader = RowReader::new(Self::TABLE, Self::FIELDS, row)?;
        Ok(Self {
            id: reader.uuid("id")?,
            full_name: reader.text("full_name")?,
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
            SqlValue::Text(Some(self.full_name.clone())),
            SqlValue::Timestamp(Some(self.created)),
            SqlValue::Timestamp(Some(self.modified)),
        ]
    }
}
