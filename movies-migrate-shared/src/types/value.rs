use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use uuid::Uuid;

/// A value as stored in the source database, before any coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SourceValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SourceValue::Null => "NULL",
            SourceValue::Integer(_) => "INTEGER",
            SourceValue::Real(_) => "REAL",
            SourceValue::Text(_) => "TEXT",
            SourceValue::Blob(_) => "BLOB",
        }
    }
}

/// Column type on the destination side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Uuid,
    Text,
    Float,
    Timestamp,
}

/// One entry of a record's statically declared field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: ValueKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind }
    }
}

/// A typed value ready to be bound to a destination statement.
///
/// NULLs stay inside their variant so the bound parameter keeps its SQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(Option<String>),
    Float(Option<f64>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SqlValue::Uuid(_) => ValueKind::Uuid,
            SqlValue::Text(_) => ValueKind::Text,
            SqlValue::Float(_) => ValueKind::Float,
            SqlValue::Timestamp(_) => ValueKind::Timestamp,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Uuid(id) => write!(f, "{id}"),
            SqlValue::Text(Some(text)) => write!(f, "{text:?}"),
            SqlValue::Float(Some(number)) => write!(f, "{number}"),
            SqlValue::Timestamp(Some(at)) => {
                write!(f, "{}", at.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            SqlValue::Text(None) | SqlValue::Float(None) | SqlValue::Timestamp(None) => {
                write!(f, "NULL")
            }
        }
    }
}
