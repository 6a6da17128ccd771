//! SSO Auth Core - Authentication business logic
//!
//! Credential verification, password hashing policy, and per-app session
//! token issuance. Storage is reached only through the capability
//! contracts in [`sso_db`].

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::*;
pub use error::*;
pub use password::*;
pub use service::*;
pub use token::*;
