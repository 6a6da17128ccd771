//! SQLite repository implementations

mod app;
mod user;

pub use app::SqliteAppRepository;
pub use user::SqliteUserRepository;

use crate::pool::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: SqliteUserRepository,
    pub apps: SqliteAppRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            apps: SqliteAppRepository::new(pool),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
