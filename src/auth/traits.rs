//! Trait abstraction for the account backend to enable mocking in tests

use super::{Account, AuthError, ProfileUpdate, Registration};
use async_trait::async_trait;
use uuid::Uuid;

/// Account backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBackendTrait: Send + Sync {
    /// Check a username/password pair
    async fn authenticate(&mut self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Create a new account
    async fn register(&mut self, registration: Registration) -> Result<Account, AuthError>;

    /// Update username, email and phone of an existing account
    async fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> Result<Account, AuthError>;
}
