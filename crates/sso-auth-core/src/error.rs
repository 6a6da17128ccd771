//! Auth errors

use sso_db::DbError;
use thiserror::Error;

use crate::token::TokenError;

/// Authentication errors
///
/// Deliberately coarse: callers can never tell a wrong email from a wrong
/// password.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("user already exists")]
    UserExists,

    /// No user with the given id
    #[error("user not found")]
    UserNotFound,

    /// No app with the given id
    #[error("app not found")]
    AppNotFound,

    /// App id rejected before lookup (not a positive integer)
    #[error("invalid app id")]
    InvalidAppId,

    /// Token could not be minted (empty secret, zero TTL, signing failure)
    #[error("token issuance failed: {0}")]
    TokenIssuanceFailed(#[from] TokenError),

    /// Unexpected storage or hashing failure
    #[error("internal error: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::UserExists => 409,
            Self::UserNotFound | Self::AppNotFound => 404,
            Self::InvalidAppId => 400,
            Self::TokenIssuanceFailed(_) | Self::Unknown(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserExists => "USER_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AppNotFound => "APP_NOT_FOUND",
            Self::InvalidAppId => "INVALID_APP_ID",
            Self::TokenIssuanceFailed(_) => "TOKEN_ISSUANCE_FAILED",
            Self::Unknown(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error reflects an operational fault rather than bad input
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UserExists => Self::UserExists,
            DbError::UserNotFound => Self::UserNotFound,
            DbError::AppNotFound => Self::AppNotFound,
            _ => Self::Unknown("storage failure".to_string()),
        }
    }
}
