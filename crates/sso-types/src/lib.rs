//! SSO Types - Shared domain types
//!
//! This crate contains domain types used across SSO services:
//! - User identity and credentials
//! - Client applications and their signing secrets

pub mod app;
pub mod user;

pub use app::*;
pub use user::*;
