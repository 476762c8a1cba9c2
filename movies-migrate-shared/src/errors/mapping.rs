//! Errors raised while turning a raw source row into a typed record.
use thiserror::Error;

use crate::types::Table;

/// Represents the ways a raw row can fail to become a record.
///
/// Every variant names the table, the row id when the row has a readable
/// `id` column and, where it applies, the field, so a skipped row can be
/// found again from the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error(
        "{table} row {}: columns do not match record fields (missing: {missing:?}, unexpected: {unexpected:?})",
        .id.as_deref().unwrap_or("unknown")
    )]
    SchemaMismatch {
        table: Table,
        id: Option<String>,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("{table}.{field} row {}: unexpected NULL", .id.as_deref().unwrap_or("unknown"))]
    UnexpectedNull {
        table: Table,
        id: Option<String>,
        field: &'static str,
    },

    #[error(
        "{table}.{field} row {}: cannot read {found} as {expected}",
        .id.as_deref().unwrap_or("unknown")
    )]
    TypeMismatch {
        table: Table,
        id: Option<String>,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error(
        "{table}.{field} row {}: invalid value {value:?}: {reason}",
        .id.as_deref().unwrap_or("unknown")
    )]
    InvalidValue {
        table: Table,
        id: Option<String>,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "{table}.{field} row {}: {value} is outside [{min}, {max}]",
        .id.as_deref().unwrap_or("unknown")
    )]
    OutOfRange {
        table: Table,
        id: Option<String>,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl MappingError {
    /// Id of the row that failed, if it could be read.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { id, .. }
            | Self::UnexpectedNull { id, .. }
            | Self::TypeMismatch { id, .. }
            | Self::InvalidValue { id, .. }
            | Self::OutOfRange { id, .. } => id.as_deref(),
        }
    }
}
