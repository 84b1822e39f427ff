//! Database pool construction
//!
//! The catalog lives in a single SQLite database. The deployment profile is
//! one server instance serving low-volume marketing traffic, so an embedded
//! store with unique constraints, transactions, and `RETURNING` covers
//! everything the pipeline needs.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Create the SQLite connection pool.
///
/// The database file is created on first start; foreign keys are enforced
/// on every connection.
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.connect_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await?;

    Ok(pool)
}
