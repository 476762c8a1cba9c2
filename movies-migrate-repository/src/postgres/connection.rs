use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::errors::WriterError;

/// Opens the destination pool.
///
/// The migration runs on one connection holding one transaction, so the pool
/// never grows beyond a single connection.
pub async fn connect(options: PgConnectOptions) -> Result<PgPool, WriterError> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(WriterError::Connection)
}
