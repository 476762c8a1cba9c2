//! Settings for a migration run, read once at startup.
//!
//! # Environment Variables
//!
//! - `POSTGRES_HOST`: destination host (default: localhost)
//! - `POSTGRES_PORT`: destination port (default: 5432)
//! - `POSTGRES_DB`, `POSTGRES_USER`, `POSTGRES_PASSWORD`: required
//! - `PATH_TO_SQLITE`: source database file, required
//! - `MIGRATION_SCHEMA`: destination schema (default: content)
//! - `MIGRATION_BATCH_SIZE`: rows per batch, 1 to 10000 (default: 100)
//! - `MIGRATION_TABLES`: comma separated subset of tables (default: all)
use movies_migrate_shared::Table;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::path::PathBuf;

use crate::errors::ConfigError;

const DEFAULT_POSTGRES_HOST: &str = "localhost";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_SCHEMA: &str = "content";
pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Longest identifier PostgreSQL keeps without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Connection parameters for the destination.
#[derive(Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl PostgresSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// What to migrate and how, independent of where the stores live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSettings {
    pub schema: String,
    pub batch_size: usize,
    /// Always in load order, without duplicates.
    pub tables: Vec<Table>,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            tables: Table::LOAD_ORDER.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub postgres: PostgresSettings,
    pub sqlite_path: PathBuf,
    pub migration: MigrationSettings,
}

impl MigrationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("POSTGRES_PORT") {
            Some(value) => parse_number::<u16>("POSTGRES_PORT", &value)?,
            None => DEFAULT_POSTGRES_PORT,
        };

        let postgres = PostgresSettings {
            host: get("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_POSTGRES_HOST.to_string()),
            port,
            database: require("POSTGRES_DB")?,
            user: require("POSTGRES_USER")?,
            password: require("POSTGRES_PASSWORD")?,
        };

        let sqlite_path = PathBuf::from(require("PATH_TO_SQLITE")?);

        let schema = get("MIGRATION_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        validate_schema(&schema)?;

        let batch_size = match get("MIGRATION_BATCH_SIZE") {
            Some(value) => parse_number::<usize>("MIGRATION_BATCH_SIZE", &value)?,
            None => DEFAULT_BATCH_SIZE,
        };
        if !(1..=MAX_BATCH_SIZE).contains(&batch_size) {
            return Err(ConfigError::BatchSizeOutOfRange {
                value: batch_size,
                min: 1,
                max: MAX_BATCH_SIZE,
            });
        }

        let tables = match get("MIGRATION_TABLES") {
            Some(value) => parse_tables(&value)?,
            None => Table::LOAD_ORDER.to_vec(),
        };

        Ok(Self {
            postgres,
            sqlite_path,
            migration: MigrationSettings {
                schema,
                batch_size,
                tables,
            },
        })
    }
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parses a comma separated table list and puts it in load order.
pub fn parse_tables(value: &str) -> Result<Vec<Table>, ConfigError> {
    let mut tables = value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Table>)
        .collect::<Result<Vec<_>, _>>()?;

    tables.sort_by_key(Table::load_rank);
    tables.dedup();
    Ok(tables)
}

/// The schema name ends up in generated SQL, so only plain identifiers pass.
fn validate_schema(schema: &str) -> Result<(), ConfigError> {
    let mut chars = schema.chars();
    let valid_start = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && schema.len() <= MAX_IDENTIFIER_LEN {
        Ok(())
    } else {
        Err(ConfigError::InvalidSchema(schema.to_string()))
    }
}
