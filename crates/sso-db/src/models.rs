//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! They intentionally do not implement `Debug`: rows carry password hashes
//! and app secrets.

use sqlx::FromRow;
use sso_types::{App, AppId, User, UserId};

/// User row from the database
#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub pass_hash: Vec<u8>,
    pub is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.pass_hash,
        }
    }
}

/// App row from the database
#[derive(Clone, FromRow)]
pub struct AppRow {
    pub id: i32,
    pub name: String,
    pub secret: Vec<u8>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: row.secret,
        }
    }
}
