//! Mock repositories for testing

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sso_db::{AppProvider, DbError, DbResult, UserProvider, UserSaver};
use sso_types::{App, AppId, User, UserId};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct StoredUser {
    user: User,
    is_admin: bool,
}

/// In-memory user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    by_email: Arc<DashMap<String, StoredUser>>,
    email_by_id: Arc<DashMap<UserId, String>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self {
            by_email: Arc::default(),
            email_by_id: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Stored password hash for an email
    #[allow(dead_code)]
    pub fn stored_hash(&self, email: &str) -> Option<Vec<u8>> {
        self.by_email
            .get(email)
            .map(|r| r.value().user.password_hash.clone())
    }

    /// Flip the admin flag of an existing user
    #[allow(dead_code)]
    pub fn set_admin(&self, user_id: UserId, is_admin: bool) {
        if let Some(email) = self.email_by_id.get(&user_id) {
            if let Some(mut stored) = self.by_email.get_mut(email.value()) {
                stored.is_admin = is_admin;
            }
        }
    }
}

#[async_trait]
impl UserSaver for MockUserRepository {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> DbResult<UserId> {
        // The entry guard makes check-and-insert atomic per email
        match self.by_email.entry(email.to_string()) {
            Entry::Occupied(_) => Err(DbError::UserExists),
            Entry::Vacant(slot) => {
                let id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst));
                slot.insert(StoredUser {
                    user: User::new(id, email, password_hash.to_vec()),
                    is_admin: false,
                });
                self.email_by_id.insert(id, email.to_string());
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl UserProvider for MockUserRepository {
    async fn user(&self, email: &str) -> DbResult<User> {
        self.by_email
            .get(email)
            .map(|r| r.value().user.clone())
            .ok_or(DbError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> DbResult<bool> {
        let email = self
            .email_by_id
            .get(&user_id)
            .map(|r| r.value().clone())
            .ok_or(DbError::UserNotFound)?;

        self.by_email
            .get(&email)
            .map(|r| r.value().is_admin)
            .ok_or(DbError::UserNotFound)
    }
}

/// In-memory app repository for testing
#[derive(Default, Clone)]
pub struct MockAppRepository {
    apps: Arc<DashMap<AppId, App>>,
}

impl MockAppRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test app directly
    pub fn insert_app(&self, app: App) {
        self.apps.insert(app.id, app);
    }
}

#[async_trait]
impl AppProvider for MockAppRepository {
    async fn app(&self, app_id: AppId) -> DbResult<App> {
        self.apps
            .get(&app_id)
            .map(|r| r.value().clone())
            .ok_or(DbError::AppNotFound)
    }
}

/// Store whose every call fails with a backend error
#[derive(Default, Clone, Copy)]
pub struct FailingStore;

#[async_trait]
impl UserSaver for FailingStore {
    async fn save_user(&self, _: &str, _: &[u8]) -> DbResult<UserId> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl UserProvider for FailingStore {
    async fn user(&self, _: &str) -> DbResult<User> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn is_admin(&self, _: UserId) -> DbResult<bool> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl AppProvider for FailingStore {
    async fn app(&self, _: AppId) -> DbResult<App> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_user_repo() {
        let repo = MockUserRepository::new();

        let id = repo.save_user("test@example.com", b"hash").await.unwrap();
        assert_eq!(id, UserId(1));

        let found = repo.user("test@example.com").await.unwrap();
        assert_eq!(found.id, id);

        assert!(matches!(
            repo.save_user("test@example.com", b"other").await,
            Err(DbError::UserExists)
        ));

        assert!(!repo.is_admin(id).await.unwrap());
        repo.set_admin(id, true);
        assert!(repo.is_admin(id).await.unwrap());

        assert!(matches!(
            repo.is_admin(UserId(99)).await,
            Err(DbError::UserNotFound)
        ));
    }
}
