//! Storage capability contracts
//!
//! Three narrow async traits. A store may implement any subset; the auth
//! core depends on each one separately so test doubles only need the
//! operations under exercise. None of them hash, sign, or validate.

use async_trait::async_trait;
use sso_types::{App, AppId, User, UserId};

use crate::error::DbResult;

/// Persists new users
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return its id.
    ///
    /// Fails with [`DbError::UserExists`](crate::DbError::UserExists) when the
    /// email is already registered.
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> DbResult<UserId>;
}

/// Looks up existing users
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Find a user by email.
    ///
    /// Fails with [`DbError::UserNotFound`](crate::DbError::UserNotFound).
    async fn user(&self, email: &str) -> DbResult<User>;

    /// Read the admin flag of a user.
    ///
    /// Fails with [`DbError::UserNotFound`](crate::DbError::UserNotFound).
    async fn is_admin(&self, user_id: UserId) -> DbResult<bool>;
}

/// Looks up client applications
#[async_trait]
pub trait AppProvider: Send + Sync {
    /// Find an app by id.
    ///
    /// Fails with [`DbError::AppNotFound`](crate::DbError::AppNotFound).
    async fn app(&self, app_id: AppId) -> DbResult<App>;
}
