//! Configuration types for auth service

use std::time::Duration;

/// Lowest bcrypt cost accepted by the hasher
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt cost accepted by the hasher
pub const MAX_BCRYPT_COST: u32 = 31;

/// Auth service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Lifetime applied to every issued token
    pub token_ttl: Duration,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Default token lifetime
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60); // 1 hour

    /// Create a config with the given token lifetime and the default cost
    pub fn new(token_ttl: Duration) -> Self {
        Self {
            token_ttl,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a validated config
    pub fn try_new(token_ttl: Duration, bcrypt_cost: u32) -> Result<Self, ConfigError> {
        let config = Self {
            token_ttl,
            bcrypt_cost,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check TTL and cost bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_ttl.is_zero() {
            return Err(ConfigError::ZeroTokenTtl);
        }
        if self.token_ttl.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalTokenTtl(self.token_ttl));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.bcrypt_cost));
        }
        Ok(())
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Set bcrypt cost
    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOKEN_TTL)
    }
}

/// Errors raised while building an [`AuthConfig`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("token TTL must be greater than zero")]
    ZeroTokenTtl,

    #[error("token TTL {0:?} is not a whole number of seconds")]
    FractionalTokenTtl(Duration),

    #[error("bcrypt cost {0} outside 4..=31")]
    InvalidBcryptCost(u32),
}
