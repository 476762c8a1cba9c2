//! Error types for the source and destination adapters.
mod destination;
mod source;
mod writer;

pub use destination::DestinationError;
pub use source::SourceError;
pub use writer::WriterError;
