//! Account backend for sign-in, registration and profile updates

mod store;
mod traits;

pub use store::AccountStore;
pub use traits::AuthBackendTrait;

#[cfg(test)]
pub use traits::MockAuthBackendTrait;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-up user, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration request as submitted by the register form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Profile changes. Empty username/email leave the stored value as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// Refusals from the account backend. The messages are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("The two passwords do not match")]
    PasswordMismatch,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("Account not found")]
    UnknownAccount,
    #[error("Phone number must be 11 digits")]
    InvalidPhone,
    #[error("Account storage failed: {0}")]
    Storage(String),
}
