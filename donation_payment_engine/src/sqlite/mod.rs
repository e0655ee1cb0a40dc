//! # SQLite backend
//!
//! Concrete SQLite implementation of the engine's storage traits, plus pool construction and the
//! schema migrator.

pub mod db;
mod sqlite_impl;

use std::{env, str::FromStr, time::Duration};

use log::info;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub use sqlite_impl::SqliteDatabase;

use crate::traits::LedgerError;

const SQLITE_DB_URL: &str = "sqlite://data/donations.db";

/// How long a writer may wait on the SQLite write lock before the statement fails. Keeps lock
/// contention bounded rather than hanging an ingestion request indefinitely.
const DB_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
/// How long a request may wait for a pool connection.
const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub static MIGRATOR: Migrator = sqlx::migrate!("./src/sqlite/migrations");

pub fn db_url() -> String {
    let result = env::var("DPG_DATABASE_URL").unwrap_or_else(|_| {
        info!("DPG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.busy_timeout(DB_BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Bring the schema up to date. Called once at startup, before the server accepts traffic.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), LedgerError> {
    MIGRATOR.run(pool).await.map_err(|e| LedgerError::DatabaseError(e.to_string()))?;
    info!("🗃️ Database migrations complete");
    Ok(())
}
