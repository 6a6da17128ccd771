//! Session token issuance and verification
//!
//! Tokens are self-contained and signed with the requesting app's secret, so
//! a token minted for one app never verifies against another app's key.
//! The wire format sits behind [`TokenCodec`]; [`Hs256Codec`] (JWT, HMAC-SHA256)
//! is the default.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sso_types::{App, AppId, User, UserId};

/// Claims embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub uid: i64,
    /// User email
    pub email: String,
    /// App the token was issued for
    pub app_id: i32,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn user_id(&self) -> UserId {
        UserId(self.uid)
    }

    pub fn app_id(&self) -> AppId {
        AppId(self.app_id)
    }
}

/// Token errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    /// Signing preconditions violated; nothing was signed
    #[error("invalid token input: {0}")]
    InvalidInput(&'static str),

    /// The codec failed to sign the claims
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Malformed token or bad signature
    #[error("invalid token")]
    Invalid,

    /// Token is past its expiry
    #[error("token expired")]
    Expired,

    /// Token was issued for a different app
    #[error("token issued for app {actual}, expected app {expected}")]
    AppMismatch { expected: AppId, actual: AppId },
}

/// Encodes claims into a signed string and back
pub trait TokenCodec: Send + Sync {
    /// Sign claims with `secret`
    fn encode(&self, claims: &SessionClaims, secret: &[u8]) -> Result<String, TokenError>;

    /// Check the signature with `secret` and return the claims
    fn decode(&self, token: &str, secret: &[u8]) -> Result<SessionClaims, TokenError>;
}

/// JWT codec signing with HMAC-SHA256
#[derive(Debug, Clone, Copy, Default)]
pub struct Hs256Codec;

impl TokenCodec for Hs256Codec {
    fn encode(&self, claims: &SessionClaims, secret: &[u8]) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn decode(&self, token: &str, secret: &[u8]) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // App binding is checked against the `app_id` claim, not `aud`
        validation.validate_aud = false;
        validation.leeway = 0;

        let token_data = decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        Ok(token_data.claims)
    }
}

/// Mints and verifies per-app session tokens
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer<C = Hs256Codec> {
    codec: C,
}

impl TokenIssuer<Hs256Codec> {
    /// Create an issuer using the JWT HS256 codec
    pub fn new() -> Self {
        Self { codec: Hs256Codec }
    }
}

impl<C: TokenCodec> TokenIssuer<C> {
    /// Create an issuer with a custom codec
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Issue a token for `user` scoped to `app`, valid for `ttl` from now
    ///
    /// # Errors
    /// [`TokenError::InvalidInput`] if the app secret is empty, or `ttl` is zero
    /// or not a whole number of seconds.
    pub fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        if !app.has_secret() {
            return Err(TokenError::InvalidInput("empty app secret"));
        }
        if ttl.is_zero() {
            return Err(TokenError::InvalidInput("token ttl must be positive"));
        }
        // Claims carry whole seconds; exp must equal iat + ttl exactly
        if ttl.subsec_nanos() != 0 {
            return Err(TokenError::InvalidInput("token ttl must be whole seconds"));
        }

        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| TokenError::InvalidInput("token ttl out of range"))?;
        let iat = Utc::now().timestamp();
        let exp = iat
            .checked_add(ttl_secs)
            .ok_or(TokenError::InvalidInput("token ttl out of range"))?;

        let claims = SessionClaims {
            uid: user.id.0,
            email: user.email.clone(),
            app_id: app.id.0,
            iat,
            exp,
        };

        self.codec.encode(&claims, &app.secret)
    }

    /// Verify a token against `app` and return its claims
    ///
    /// Used by services holding the app secret; the auth core never stores
    /// or re-checks tokens it has issued.
    pub fn verify(&self, token: &str, app: &App) -> Result<SessionClaims, TokenError> {
        if !app.has_secret() {
            return Err(TokenError::InvalidInput("empty app secret"));
        }

        let claims = self.codec.decode(token, &app.secret)?;

        if claims.app_id != app.id.0 {
            return Err(TokenError::AppMismatch {
                expected: app.id,
                actual: claims.app_id(),
            });
        }

        // TokenCodec implementations are not required to check `exp`
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
