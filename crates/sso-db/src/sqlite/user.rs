//! SQLite user repository implementation

use async_trait::async_trait;
use sso_types::{User, UserId};

use super::is_unique_violation;
use crate::error::{DbError, DbResult};
use crate::models::UserRow;
use crate::pool::DbPool;
use crate::repo::{UserProvider, UserSaver};

/// SQLite user repository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    /// Create a new user repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Grant or revoke admin rights
    ///
    /// Provisioning helper for operators; the auth core never calls it.
    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin)
            .bind(user_id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl UserSaver for SqliteUserRepository {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> DbResult<UserId> {
        let result = sqlx::query("INSERT INTO users (email, pass_hash) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(UserId(done.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(DbError::UserExists),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl UserProvider for SqliteUserRepository {
    async fn user(&self, email: &str) -> DbResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(DbError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> DbResult<bool> {
        let is_admin = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?")
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await?;

        is_admin.ok_or(DbError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{create_memory_pool, run_migrations};

    async fn repo() -> SqliteUserRepository {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_find_user() {
        let repo = repo().await;

        let id = repo.save_user("a@x.com", b"hash-bytes").await.unwrap();
        assert_eq!(id, UserId(1));

        let user = repo.user("a@x.com").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password_hash, b"hash-bytes");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_user_exists() {
        let repo = repo().await;

        repo.save_user("dup@x.com", b"h1").await.unwrap();
        let err = repo.save_user("dup@x.com", b"h2").await.unwrap_err();
        assert!(matches!(err, DbError::UserExists));

        // Original row untouched
        let user = repo.user("dup@x.com").await.unwrap();
        assert_eq!(user.password_hash, b"h1");
    }

    #[tokio::test]
    async fn test_unknown_email_is_user_not_found() {
        let repo = repo().await;
        let err = repo.user("nobody@x.com").await.unwrap_err();
        assert!(matches!(err, DbError::UserNotFound));
    }

    #[tokio::test]
    async fn test_is_admin() {
        let repo = repo().await;
        let id = repo.save_user("admin@x.com", b"h").await.unwrap();

        assert!(!repo.is_admin(id).await.unwrap());

        repo.set_admin(id, true).await.unwrap();
        assert!(repo.is_admin(id).await.unwrap());

        let err = repo.is_admin(UserId(999)).await.unwrap_err();
        assert!(matches!(err, DbError::UserNotFound));
    }

    #[tokio::test]
    async fn test_set_admin_unknown_user() {
        let repo = repo().await;
        let err = repo.set_admin(UserId(42), true).await.unwrap_err();
        assert!(matches!(err, DbError::UserNotFound));
    }
}
