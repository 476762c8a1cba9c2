use thiserror::Error;

/// A table name that is not part of the movies catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown table: {0}")]
pub struct UnknownTable(pub String);
