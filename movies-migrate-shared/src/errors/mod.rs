//! Error types shared across the migration crates.
mod mapping;
mod table;

pub use mapping::MappingError;
pub use table::UnknownTable;
