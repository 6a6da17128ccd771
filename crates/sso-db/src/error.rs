//! Database errors

use thiserror::Error;

/// Storage errors
///
/// The lookup and uniqueness variants are part of the capability contracts;
/// everything else is an opaque backend failure.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Email already registered
    #[error("user already exists")]
    UserExists,

    /// No user with the given email or id
    #[error("user not found")]
    UserNotFound,

    /// No app with the given id
    #[error("app not found")]
    AppNotFound,

    /// App id or name already provisioned
    #[error("app already exists")]
    AppExists,
}

/// Result alias for storage operations
pub type DbResult<T> = Result<T, DbError>;
