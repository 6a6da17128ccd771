//! SQLite app repository implementation

use async_trait::async_trait;
use sso_types::{App, AppId};

use super::is_unique_violation;
use crate::error::{DbError, DbResult};
use crate::models::AppRow;
use crate::pool::DbPool;
use crate::repo::AppProvider;

/// SQLite app repository
#[derive(Clone)]
pub struct SqliteAppRepository {
    pool: DbPool,
}

impl SqliteAppRepository {
    /// Create a new app repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Provision a client application
    ///
    /// Apps are registered out-of-band by operators; the auth core only reads them.
    pub async fn create(&self, app: &App) -> DbResult<()> {
        let result = sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(app.id.0)
            .bind(&app.name)
            .bind(&app.secret)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DbError::AppExists),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AppProvider for SqliteAppRepository {
    async fn app(&self, app_id: AppId) -> DbResult<App> {
        let row = sqlx::query_as::<_, AppRow>("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(app_id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(App::from).ok_or(DbError::AppNotFound)
    }
}
