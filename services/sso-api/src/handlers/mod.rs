//! HTTP handlers

mod auth;
mod health;

pub use auth::{is_admin, login, register};
pub use health::{health, ready};
