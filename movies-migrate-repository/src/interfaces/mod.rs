//! Interfaces between the orchestrator and the destination store.
mod record_writer;

pub use record_writer::{RecordWriter, UpsertOutcome};
