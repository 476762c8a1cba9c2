//! Row mapper: checks a raw row against a record's field list and coerces its
//! values into Rust types.
//!
//! Aliasing and defaulting belong to the extraction queries. The mapper only
//! coerces types and rejects rows whose shape does not match the record.
mod timestamp;

pub use timestamp::parse_timestamp;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::MappingError;
use crate::types::{Field, RawRow, SourceValue, Table};

/// Typed access to the columns of a row that has passed the shape check.
pub struct RowReader<'r> {
    table: Table,
    id: Option<String>,
    row: &'r RawRow,
}

impl<'r> RowReader<'r> {
    /// Validates that `row` has exactly the columns named in `fields`.
    pub fn new(table: Table, fields: &[Field], row: &'r RawRow) -> Result<Self, MappingError> {
        let id = row.id_hint();
        let missing: Vec<String> = fields
            .iter()
            .filter(|field| row.get(field.name).is_none())
            .map(|field| field.name.to_string())
            .collect();

        let mut unexpected: Vec<String> = Vec::new();
        for (position, name) in row.column_names().enumerate() {
            let known = fields.iter().any(|field| field.name == name);
            let repeated = row.column_names().take(position).any(|seen| seen == name);
            if !known || repeated {
                unexpected.push(name.to_string());
            }
        }

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(MappingError::SchemaMismatch {
                table,
                id,
                missing,
                unexpected,
            });
        }

        Ok(Self { table, id, row })
    }

    pub fn uuid(&self, field: &'static str) -> Result<Uuid, MappingError> {
        match self.value(field)? {
            SourceValue::Text(text) => {
                Uuid::parse_str(text.trim()).map_err(|e| self.invalid(field, text, e.to_string()))
            }
            SourceValue::Blob(bytes) => Uuid::from_slice(bytes)
                .map_err(|e| self.invalid(field, &format!("{bytes:?}"), e.to_string())),
            SourceValue::Null => Err(self.null(field)),
            other => Err(self.mismatch(field, "UUID", other)),
        }
    }

    pub fn text(&self, field: &'static str) -> Result<String, MappingError> {
        self.optional_text(field)?.ok_or_else(|| self.null(field))
    }

    pub fn optional_text(&self, field: &'static str) -> Result<Option<String>, MappingError> {
        match self.value(field)? {
            SourceValue::Null => Ok(None),
            SourceValue::Text(text) => Ok(Some(text.clone())),
            other => Err(self.mismatch(field, "TEXT", other)),
        }
    }

    pub fn timestamp(&self, field: &'static str) -> Result<DateTime<Utc>, MappingError> {
        self.optional_timestamp(field)?
            .ok_or_else(|| self.null(field))
    }

    pub fn optional_timestamp(
        &self,
        field: &'static str,
    ) -> Result<Option<DateTime<Utc>>, MappingError> {
        match self.value(field)? {
            SourceValue::Null => Ok(None),
            SourceValue::Text(text) => parse_timestamp(text)
                .map(Some)
                .map_err(|reason| self.invalid(field, text, reason)),
            other => Err(self.mismatch(field, "timestamp", other)),
        }
    }

    pub fn optional_float(&self, field: &'static str) -> Result<Option<f64>, MappingError> {
        match self.value(field)? {
            SourceValue::Null => Ok(None),
            SourceValue::Real(number) => Ok(Some(*number)),
            SourceValue::Integer(number) => Ok(Some(*number as f64)),
            SourceValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| self.invalid(field, text, e.to_string())),
            other => Err(self.mismatch(field, "REAL", other)),
        }
    }

    /// Like [`RowReader::optional_float`], rejecting values outside `[min, max]`.
    pub fn optional_float_within(
        &self,
        field: &'static str,
        min: f64,
        max: f64,
    ) -> Result<Option<f64>, MappingError> {
        match self.optional_float(field)? {
            Some(value) if !(min..=max).contains(&value) => Err(MappingError::OutOfRange {
                table: self.table,
                id: self.id.clone(),
                field,
                value,
                min,
                max,
            }),
            value => Ok(value),
        }
    }

    /// Reads a text column and parses it with `parse`.
    pub fn parsed<T, E: ToString>(
        &self,
        field: &'static str,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<T, MappingError> {
        let text = self.text(field)?;
        parse(&text).map_err(|e| self.invalid(field, &text, e.to_string()))
    }

    fn value(&self, field: &'static str) -> Result<&'r SourceValue, MappingError> {
        self.row.get(field).ok_or_else(|| MappingError::SchemaMismatch {
            table: self.table,
            id: self.id.clone(),
            missing: vec![field.to_string()],
            unexpected: Vec::new(),
        })
    }

    fn null(&self, field: &'static str) -> MappingError {
        MappingError::UnexpectedNull {
            table: self.table,
            id: self.id.clone(),
            field,
        }
    }

    fn mismatch(
        &self,
        field: &'static str,
        expected: &'static str,
        found: &SourceValue,
    ) -> MappingError {
        MappingError::TypeMismatch {
            table: self.table,
            id: self.id.clone(),
            field,
            expected,
            found: found.type_name(),
        }
    }

    fn invalid(&self, field: &'static str, value: &str, reason: String) -> MappingError {
        MappingError::InvalidValue {
            table: self.table,
            id: self.id.clone(),
            field,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    const FIELDS: &[Field] = &[
        Field::new("id", ValueKind::Uuid),
        Field::new("name", ValueKind::Text),
    ];

    fn text(value: &str) -> SourceValue {
        SourceValue::Text(value.to_string())
    }

    #[test]
    fn reports_missing_and_unexpected_columns() {
        let row = RawRow::new()
            .with("id", text("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31"))
            .with("title", text("Drama"));

        let error = RowReader::new(Table::Genre, FIELDS, &row).err();
        assert_eq!(
            error,
            Some(MappingError::SchemaMismatch {
                table: Table::Genre,
                id: Some("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31".to_string()),
                missing: vec!["name".to_string()],
                unexpected: vec!["title".to_string()],
            })
        );
    }

    #[test]
    fn rejects_duplicated_columns() {
        let row = RawRow::new()
            .with("id", text("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31"))
            .with("name", text("Drama"))
            .with("name", text("Comedy"));

        assert!(matches!(
            RowReader::new(Table::Genre, FIELDS, &row),
            Err(MappingError::SchemaMismatch { unexpected, .. }) if unexpected == vec!["name".to_string()]
        ));
    }

    #[test]
    fn coerces_integer_to_float() {
        let fields = &[Field::new("rating", ValueKind::Float)];
        let row = RawRow::new().with("rating", SourceValue::Integer(8));
        let reader = RowReader::new(Table::FilmWork, fields, &row).unwrap();
        assert_eq!(reader.optional_float("rating").unwrap(), Some(8.0));
    }

    #[test]
    fn null_text_is_rejected_where_required() {
        let row = RawRow::new()
            .with("id", text("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31"))
            .with("name", SourceValue::Null);
        let reader = RowReader::new(Table::Genre, FIELDS, &row).unwrap();

        assert_eq!(reader.optional_text("name").unwrap(), None);
        assert_eq!(
            reader.text("name"),
            Err(MappingError::UnexpectedNull {
                table: Table::Genre,
                id: Some("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31".to_string()),
                field: "name"
            })
        );
    }

    #[test]
    fn invalid_uuid_carries_the_value() {
        let row = RawRow::new()
            .with("id", text("not-a-uuid"))
            .with("name", text("Drama"));
        let reader = RowReader::new(Table::Genre, FIELDS, &row).unwrap();

        assert!(matches!(
            reader.uuid("id"),
            Err(MappingError::InvalidValue { field: "id", value, .. }) if value == "not-a-uuid"
        ));
    }

    #[test]
    fn errors_name_the_failing_row() {
        let row = RawRow::new()
            .with("id", text("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31"))
            .with("name", SourceValue::Integer(7));
        let reader = RowReader::new(Table::Genre, FIELDS, &row).unwrap();

        let error = reader.text("name").unwrap_err();
        assert_eq!(error.id(), Some("b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31"));
        assert_eq!(
            error.to_string(),
            "genre.name row b8531f6d-7e1f-4e46-9a4a-3d1e8f5cbb31: cannot read INTEGER as TEXT"
        );
    }

    #[test]
    fn rows_without_a_readable_id_report_unknown() {
        let row = RawRow::new()
            .with("id", SourceValue::Null)
            .with("name", text("Drama"));
        let reader = RowReader::new(Table::Genre, FIELDS, &row).unwrap();

        let error = reader.uuid("id").unwrap_err();
        assert_eq!(error.id(), None);
        assert_eq!(error.to_string(), "genre.id row unknown: unexpected NULL");
    }

    #[test]
    fn float_range_is_inclusive() {
        let fields = &[Field::new("rating", ValueKind::Float)];
        for (raw, ok) in [(0.0, true), (100.0, true), (100.5, false), (-1.0, false)] {
            let row = RawRow::new().with("rating", SourceValue::Real(raw));
            let reader = RowReader::new(Table::FilmWork, fields, &row).unwrap();
            assert_eq!(
                reader.optional_float_within("rating", 0.0, 100.0).is_ok(),
                ok,
                "rating {raw}"
            );
        }
    }
}
