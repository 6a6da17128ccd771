//! Common test utilities for sso-auth-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{FailingStore, MockAppRepository, MockUserRepository};

use std::sync::Arc;
use std::time::Duration;

use sso_auth_core::{AuthConfig, AuthService, MIN_BCRYPT_COST};

/// Auth service over in-memory repositories
#[allow(dead_code)]
pub type TestAuthService = AuthService<MockUserRepository, MockUserRepository, MockAppRepository>;

/// Fast config for tests: cheapest bcrypt cost, 1 hour tokens
#[allow(dead_code)]
pub fn test_config() -> AuthConfig {
    AuthConfig::new(Duration::from_secs(3600)).with_bcrypt_cost(MIN_BCRYPT_COST)
}

/// Build a service sharing one user repository for saving and lookups
#[allow(dead_code)]
pub fn test_service(users: &MockUserRepository, apps: &MockAppRepository) -> TestAuthService {
    let users = Arc::new(users.clone());
    AuthService::new(test_config(), Arc::clone(&users), users, Arc::new(apps.clone()))
}
