//! SSO DB - Storage abstractions
//!
//! Capability contracts consumed by the auth core, plus an SQLx-based
//! SQLite implementation of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use sso_db::{create_pool, run_migrations, Repositories, UserProvider};
//!
//! let pool = create_pool("sqlite://sso.db").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.user("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pool;
pub mod repo;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pool::{create_memory_pool, create_pool, run_migrations, DbPool};
pub use repo::*;
pub use sqlite::Repositories;
