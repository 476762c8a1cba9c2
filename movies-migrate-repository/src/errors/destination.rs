use movies_migrate_shared::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("Failed to read {table} from destination: {source}")]
    Query {
        table: Table,
        #[source]
        source: sqlx::Error,
    },
}
