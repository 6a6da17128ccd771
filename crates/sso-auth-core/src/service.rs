//! Auth service - ties together credential checks, password hashing, and token issuance

use sso_db::{AppProvider, DbError, UserProvider, UserSaver};
use sso_types::{AppId, UserId};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::{
    config::AuthConfig,
    password::{PasswordError, PasswordHasher},
    token::{Hs256Codec, TokenCodec, TokenIssuer},
    AuthError,
};

/// Authentication service
///
/// Provides:
/// - Login (credential check and per-app token issuance)
/// - Registration (password hashing and persistence)
/// - Admin privilege lookups
///
/// Holds no mutable state and is safe to share across request handlers.
pub struct AuthService<S, P, A, C = Hs256Codec>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    C: TokenCodec,
{
    config: AuthConfig,
    user_saver: Arc<S>,
    user_provider: Arc<P>,
    app_provider: Arc<A>,
    issuer: TokenIssuer<C>,
    hasher: PasswordHasher,
    /// Hash verified against when the email is unknown, built lazily at the configured cost
    decoy_hash: OnceCell<Vec<u8>>,
}

/// Plaintext behind the decoy hash; never matches a real login
const DECOY_PASSWORD: &str = "sso-decoy-password";

impl<S: UserSaver, P: UserProvider, A: AppProvider> AuthService<S, P, A> {
    /// Create a new auth service issuing JWT (HS256) tokens
    pub fn new(
        config: AuthConfig,
        user_saver: Arc<S>,
        user_provider: Arc<P>,
        app_provider: Arc<A>,
    ) -> Self {
        Self::with_issuer(
            config,
            user_saver,
            user_provider,
            app_provider,
            TokenIssuer::new(),
        )
    }
}

impl<S, P, A, C> AuthService<S, P, A, C>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    C: TokenCodec,
{
    /// Create a new auth service with a custom token issuer
    pub fn with_issuer(
        config: AuthConfig,
        user_saver: Arc<S>,
        user_provider: Arc<P>,
        app_provider: Arc<A>,
        issuer: TokenIssuer<C>,
    ) -> Self {
        Self {
            hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
            user_saver,
            user_provider,
            app_provider,
            issuer,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Service configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Token issuer, for callers that need to verify tokens minted here
    pub fn token_issuer(&self) -> &TokenIssuer<C> {
        &self.issuer
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Check credentials and issue a token scoped to `app_id`
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`] after one bcrypt verification. The app is looked up only after the
    /// credentials pass, so an app id cannot be used to probe for emails.
    #[tracing::instrument(name = "auth.login", skip_all, fields(email = %email, app_id = %app_id))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(DbError::UserNotFound) => {
                tracing::warn!("user not found");
                self.verify_against_decoy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to look up user");
                return Err(AuthError::Unknown("failed to look up user".to_string()));
            }
        };

        match self.hasher.verify(password, &user.password_hash).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = %user.id, "invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(PasswordError::Task(e)) => {
                tracing::error!(error = %e, "password verification task failed");
                return Err(AuthError::Unknown("password verification failed".to_string()));
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "stored password hash unusable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let app = self.app_provider.app(app_id).await.map_err(|e| {
            if matches!(e, DbError::AppNotFound) {
                tracing::warn!("app not found");
            } else {
                tracing::error!(error = %e, "failed to look up app");
            }
            AuthError::from(e)
        })?;

        let token = self
            .issuer
            .issue(&user, &app, self.config.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to issue token");
                AuthError::TokenIssuanceFailed(e)
            })?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(token)
    }

    /// Spend the same bcrypt work as a real verification, result discarded
    async fn verify_against_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;

        match decoy {
            Ok(hash) => {
                let _ = self.hasher.verify(password, hash).await;
            }
            Err(e) => tracing::error!(error = %e, "failed to build decoy hash"),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new user and return its id
    ///
    /// Only the bcrypt hash reaches storage.
    #[tracing::instrument(name = "auth.register_new_user", skip_all, fields(email = %email))]
    pub async fn register_new_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        let password_hash = self.hasher.hash(password).await.map_err(|e| {
            tracing::error!(error = %e, "failed to generate password hash");
            AuthError::Unknown("failed to hash password".to_string())
        })?;

        let user_id = self
            .user_saver
            .save_user(email, &password_hash)
            .await
            .map_err(|e| match e {
                DbError::UserExists => {
                    tracing::warn!("user already exists");
                    AuthError::UserExists
                }
                other => {
                    tracing::error!(error = %other, "failed to save user");
                    AuthError::Unknown("failed to save user".to_string())
                }
            })?;

        tracing::info!(user_id = %user_id, "user registered");

        Ok(user_id)
    }

    // =========================================================================
    // Privileges
    // =========================================================================

    /// Whether the user has admin rights
    ///
    /// Always reads current storage state; an unknown id is an error, never `false`.
    #[tracing::instrument(name = "auth.is_admin", skip_all, fields(user_id = %user_id))]
    pub async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        let is_admin = self
            .user_provider
            .is_admin(user_id)
            .await
            .map_err(|e| {
                if matches!(e, DbError::UserNotFound) {
                    tracing::warn!("user not found");
                } else {
                    tracing::error!(error = %e, "failed to check admin flag");
                }
                AuthError::from(e)
            })?;

        tracing::info!(is_admin, "checked if user is admin");

        Ok(is_admin)
    }
}

impl<S, P, A, C> std::fmt::Debug for AuthService<S, P, A, C>
where
    S: UserSaver,
    P: UserProvider,
    A: AppProvider,
    C: TokenCodec,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
