use uuid::Uuid;

use super::{Field, RawRow, SqlValue, Table};
use crate::errors::MappingError;

/// A typed row of one catalogue table.
///
/// `FIELDS` is the single source of truth for a table's columns: the
/// extraction query aliases to it, the mapper checks rows against it, and the
/// writer builds its insert statement from it. `values` must return one value
/// per field, in `FIELDS` order, with `id` first.
pub trait Record: Sized + Send + Sync + 'static {
    const TABLE: Table;
    const FIELDS: &'static [Field];

    /// Builds the record from a raw row, failing on any column or type mismatch.
    fn from_row(row: &RawRow) -> Result<Self, MappingError>;

    fn id(&self) -> Uuid;

    fn values(&self) -> Vec<SqlValue>;

    /// Rows in other tables this record points at.
    fn parents(&self) -> Vec<(Table, Uuid)> {
        Vec::new()
    }
}
