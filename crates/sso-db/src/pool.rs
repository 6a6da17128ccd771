//! Database connection pool and migrations

use std::str::FromStr;

use sqlx::migrate::{Migrate, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::DbResult;

/// Database connection pool type alias
pub type DbPool = SqlitePool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a new database connection pool
///
/// The database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Create a pool over a private in-memory database
///
/// Limited to one connection: every SQLite in-memory connection is its own
/// database.
pub async fn create_memory_pool() -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}

/// Apply all pending migrations and return how many were applied
pub async fn run_migrations(pool: &DbPool) -> DbResult<usize> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;
    drop(conn);

    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.iter().any(|a| a.version == m.version))
        .count();

    MIGRATOR.run(pool).await?;

    if pending > 0 {
        tracing::info!(applied = pending, "Database migrations applied");
    } else {
        tracing::debug!("Database schema up to date");
    }

    Ok(pending)
}
