//! Local account store
//!
//! Accounts live in memory and, when a path is set, are written back to a
//! JSON file after every change. Passwords are kept as Argon2id PHC strings
//! with a random salt per account.

use super::{Account, AuthBackendTrait, AuthError, ProfileUpdate, Registration};
use crate::state::PHONE_DIGITS;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Environment variable overriding the account file location
const ACCOUNTS_ENV: &str = "DEAR_TRAIL_ACCOUNTS";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    #[serde(flatten)]
    account: Account,
    password_hash: String,
}

/// Account backend backed by a JSON file
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<StoredAccount>,
    path: Option<PathBuf>,
}

impl AccountStore {
    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default account file in the platform data directory
    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dear-trail", "dear-trail-tui")
            .map(|dirs| dirs.data_dir().join("accounts.json"))
    }

    /// Pick the account file: environment, then config, then platform default
    pub fn resolve_path(configured: Option<&str>) -> Option<PathBuf> {
        std::env::var(ACCOUNTS_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| configured.map(PathBuf::from))
            .or_else(Self::default_path)
    }

    /// Load accounts from `path`; a missing file starts an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let accounts = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self {
            accounts,
            path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Storage(format!("Failed to hash password: {e}")))
    }

    /// A stored hash that fails to parse never matches
    fn verify_password(password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.accounts
            .iter()
            .any(|s| s.account.username == username && Some(s.account.id) != except)
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.accounts
            .iter()
            .any(|s| s.account.email == email && Some(s.account.id) != except)
    }

    fn persist(&self) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write = || -> Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&self.accounts)?)?;
            Ok(())
        };
        write().map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[async_trait]
impl AuthBackendTrait for AccountStore {
    async fn authenticate(&mut self, username: &str, password: &str) -> Result<Account, AuthError> {
        self.accounts
            .iter()
            .find(|s| s.account.username == username)
            .filter(|s| Self::verify_password(password, &s.password_hash))
            .map(|s| s.account.clone())
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn register(&mut self, registration: Registration) -> Result<Account, AuthError> {
        if registration.password1 != registration.password2 {
            return Err(AuthError::PasswordMismatch);
        }
        if self.username_taken(&registration.username, None) {
            return Err(AuthError::UsernameTaken);
        }
        if self.email_taken(&registration.email, None) {
            return Err(AuthError::EmailTaken);
        }

        let account = Account {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            phone: None,
            created_at: Utc::now(),
        };
        let password_hash = Self::hash_password(&registration.password1)?;
        self.accounts.push(StoredAccount {
            account: account.clone(),
            password_hash,
        });

        if let Err(e) = self.persist() {
            self.accounts.pop();
            return Err(e);
        }
        Ok(account)
    }

    async fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> Result<Account, AuthError> {
        let index = self
            .accounts
            .iter()
            .position(|s| s.account.id == id)
            .ok_or(AuthError::UnknownAccount)?;
        let current = self.accounts[index].account.clone();

        let mut updated = current.clone();
        if !update.username.is_empty() && update.username != current.username {
            if self.username_taken(&update.username, Some(id)) {
                return Err(AuthError::UsernameTaken);
            }
            updated.username = update.username;
        }
        if !update.email.is_empty() && update.email != current.email {
            if self.email_taken(&update.email, Some(id)) {
                return Err(AuthError::EmailTaken);
            }
            updated.email = update.email;
        }
        updated.phone = if update.phone.is_empty() {
            None
        } else if update.phone.len() == PHONE_DIGITS
            && update.phone.chars().all(|c| c.is_ascii_digit())
        {
            Some(update.phone)
        } else {
            return Err(AuthError::InvalidPhone);
        };

        self.accounts[index].account = updated.clone();
        if let Err(e) = self.persist() {
            self.accounts[index].account = current;
            return Err(e);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password1: "secret1".to_string(),
            password2: "secret1".to_string(),
        }
    }

    mod register {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_register_creates_account() {
            let mut store = AccountStore::in_memory();
            let account = store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            assert_eq!(account.username, "alice");
            assert_eq!(account.email, "alice@example.com");
            assert!(account.phone.is_none());
            assert_eq!(store.len(), 1);
        }

        #[tokio::test]
        async fn test_password_mismatch_is_checked_first() {
            let mut store = AccountStore::in_memory();
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            let mut request = registration("alice", "alice@example.com");
            request.password2 = "other12".to_string();
            assert_eq!(
                store.register(request).await,
                Err(AuthError::PasswordMismatch)
            );
        }

        #[tokio::test]
        async fn test_duplicate_username_rejected() {
            let mut store = AccountStore::in_memory();
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            assert_eq!(
                store.register(registration("alice", "other@example.com")).await,
                Err(AuthError::UsernameTaken)
            );
            assert_eq!(store.len(), 1);
        }

        #[tokio::test]
        async fn test_duplicate_email_rejected() {
            let mut store = AccountStore::in_memory();
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            assert_eq!(
                store.register(registration("bob", "alice@example.com")).await,
                Err(AuthError::EmailTaken)
            );
        }
    }

    mod authenticate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_correct_password_signs_in() {
            let mut store = AccountStore::in_memory();
            let created = store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            let account = store.authenticate("alice", "secret1").await.unwrap();
            assert_eq!(account, created);
        }

        #[tokio::test]
        async fn test_wrong_password_or_user_is_rejected() {
            let mut store = AccountStore::in_memory();
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            assert_eq!(
                store.authenticate("alice", "Secret1").await,
                Err(AuthError::InvalidCredentials)
            );
            assert_eq!(
                store.authenticate("nobody", "secret1").await,
                Err(AuthError::InvalidCredentials)
            );
        }

        #[test]
        fn test_authenticate_on_empty_store() {
            let mut store = AccountStore::in_memory();
            let result = tokio_test::block_on(store.authenticate("alice", "secret1"));
            assert_eq!(result, Err(AuthError::InvalidCredentials));
        }

        #[test]
        fn test_hash_is_salted_argon2id() {
            let a = AccountStore::hash_password("secret1").unwrap();
            let b = AccountStore::hash_password("secret1").unwrap();
            assert_ne!(a, b);
            assert!(a.starts_with("$argon2id$"));
            assert!(!a.contains("secret1"));
            assert!(AccountStore::verify_password("secret1", &a));
            assert!(!AccountStore::verify_password("secret2", &a));
        }

        #[test]
        fn test_malformed_hash_never_matches() {
            assert!(!AccountStore::verify_password("secret1", "not a phc string"));
            assert!(!AccountStore::verify_password("", ""));
        }

        #[tokio::test]
        async fn test_stored_hash_is_phc_string() {
            let mut store = AccountStore::in_memory();
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            let stored = &store.accounts[0].password_hash;
            assert!(PasswordHash::new(stored).is_ok());
            assert!(stored.starts_with("$argon2id$"));
        }
    }

    mod update_profile {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn store_with_two() -> (AccountStore, Account) {
            let mut store = AccountStore::in_memory();
            let alice = store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();
            store
                .register(registration("bob", "bob@example.com"))
                .await
                .unwrap();
            (store, alice)
        }

        #[tokio::test]
        async fn test_updates_all_fields() {
            let (mut store, alice) = store_with_two().await;
            let updated = store
                .update_profile(
                    alice.id,
                    ProfileUpdate {
                        username: "alicia".to_string(),
                        email: "alicia@example.com".to_string(),
                        phone: "13800138000".to_string(),
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.username, "alicia");
            assert_eq!(updated.email, "alicia@example.com");
            assert_eq!(updated.phone.as_deref(), Some("13800138000"));
            assert!(store.authenticate("alicia", "secret1").await.is_ok());
        }

        #[tokio::test]
        async fn test_empty_fields_keep_current_values() {
            let (mut store, alice) = store_with_two().await;
            let updated = store
                .update_profile(alice.id, ProfileUpdate::default())
                .await
                .unwrap();
            assert_eq!(updated.username, "alice");
            assert_eq!(updated.email, "alice@example.com");
        }

        #[tokio::test]
        async fn test_taken_username_and_email_rejected() {
            let (mut store, alice) = store_with_two().await;
            let taken_name = ProfileUpdate {
                username: "bob".to_string(),
                ..Default::default()
            };
            assert_eq!(
                store.update_profile(alice.id, taken_name).await,
                Err(AuthError::UsernameTaken)
            );
            let taken_email = ProfileUpdate {
                email: "bob@example.com".to_string(),
                ..Default::default()
            };
            assert_eq!(
                store.update_profile(alice.id, taken_email).await,
                Err(AuthError::EmailTaken)
            );
        }

        #[tokio::test]
        async fn test_keeping_own_username_is_allowed() {
            let (mut store, alice) = store_with_two().await;
            let same = ProfileUpdate {
                username: "alice".to_string(),
                ..Default::default()
            };
            assert!(store.update_profile(alice.id, same).await.is_ok());
        }

        #[tokio::test]
        async fn test_bad_phone_rejected_without_changes() {
            let (mut store, alice) = store_with_two().await;
            let update = ProfileUpdate {
                username: "alicia".to_string(),
                phone: "12345".to_string(),
                ..Default::default()
            };
            assert_eq!(
                store.update_profile(alice.id, update).await,
                Err(AuthError::InvalidPhone)
            );
            assert!(store.authenticate("alice", "secret1").await.is_ok());
        }

        #[tokio::test]
        async fn test_unknown_account() {
            let mut store = AccountStore::in_memory();
            assert_eq!(
                store
                    .update_profile(Uuid::new_v4(), ProfileUpdate::default())
                    .await,
                Err(AuthError::UnknownAccount)
            );
        }
    }

    mod persistence {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_accounts_survive_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("accounts.json");

            let mut store = AccountStore::open(&path).unwrap();
            assert!(store.is_empty());
            store
                .register(registration("alice", "alice@example.com"))
                .await
                .unwrap();

            let mut reopened = AccountStore::open(&path).unwrap();
            assert_eq!(reopened.len(), 1);
            assert!(reopened.authenticate("alice", "secret1").await.is_ok());
        }

        #[test]
        fn test_open_rejects_corrupt_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("accounts.json");
            fs::write(&path, "not json").unwrap();
            assert!(AccountStore::open(&path).is_err());
        }

        #[test]
        fn test_resolve_path_prefers_configured_over_default() {
            // Only meaningful when the override variable is unset
            if std::env::var(ACCOUNTS_ENV).is_ok() {
                return;
            }
            let path = AccountStore::resolve_path(Some("/tmp/custom.json"));
            assert_eq!(path, Some(PathBuf::from("/tmp/custom.json")));
        }
    }
}
