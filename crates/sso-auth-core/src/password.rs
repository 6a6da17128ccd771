//! Password hashing
//!
//! bcrypt with a fresh salt per hash. Both hashing and verification are
//! CPU-bound, so they run on the blocking thread pool instead of the async
//! executor.

use tokio::task;

/// Errors from hashing or verifying a password
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("stored password hash is not valid UTF-8")]
    MalformedHash,

    #[error("hashing task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password into its encoded bcrypt form
    pub async fn hash(&self, password: &str) -> Result<Vec<u8>, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;

        let hashed = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed.into_bytes())
    }

    /// Compare a plaintext password with a stored hash
    ///
    /// Returns `Ok(false)` on mismatch. A stored hash that bcrypt cannot
    /// parse is an error, not a mismatch.
    pub async fn verify(&self, password: &str, hash: &[u8]) -> Result<bool, PasswordError> {
        let hash = std::str::from_utf8(hash)
            .map_err(|_| PasswordError::MalformedHash)?
            .to_owned();
        let password = password.to_owned();

        let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
