//! Client application types

use serde::{Deserialize, Serialize};

/// Unique client application identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub i32);

impl AppId {
    /// Raw numeric value
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AppId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// A client application, provisioned out-of-band
///
/// `secret` is the HMAC key for every token issued to this app's users.
#[derive(Clone, PartialEq, Eq)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub secret: Vec<u8>,
}

impl App {
    pub fn new(id: impl Into<AppId>, name: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Whether tokens can be signed for this app
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret_length", &self.secret.len())
            .finish_non_exhaustive()
    }
}
