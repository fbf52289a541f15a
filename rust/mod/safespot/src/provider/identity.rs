//! Identity provider contract.
//!
//! Sign-in, account creation, and reset dispatch are owned by an external
//! service. The core only sees `SessionRef` on success and a fixed
//! `ProviderError { code, message }` on failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde::Serialize;

/// Stable provider error codes.
///
/// Match on these, never on the message text.
pub mod error_code {
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const WRONG_PASSWORD: &str = "WRONG_PASSWORD";
    pub const EMAIL_IN_USE: &str = "EMAIL_IN_USE";
    pub const WEAK_PASSWORD: &str = "WEAK_PASSWORD";
    pub const NETWORK: &str = "NETWORK";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Minimum secret length accepted by `StaticIdentity::create_account`.
pub const MIN_SECRET_LEN: usize = 6;

/// Provider-issued session handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRef {
    pub uid: String,
    pub identifier: String,
}

/// Failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// A secret that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    async fn sign_in(&self, identifier: &str, secret: &Secret) -> Result<SessionRef, ProviderError>;

    async fn create_account(&self, identifier: &str, secret: &Secret) -> Result<SessionRef, ProviderError>;

    async fn send_password_reset(&self, identifier: &str) -> Result<(), ProviderError>;
}

/// In-process identity provider backed by an account table.
///
/// Identifiers are matched case-insensitively; secrets are compared
/// exactly. Reset requests are recorded instead of delivered.
#[derive(Default)]
pub struct StaticIdentity {
    accounts: RwLock<HashMap<String, Account>>,
    resets: RwLock<Vec<String>>,
    next_uid: AtomicU64,
}

struct Account {
    uid: String,
    identifier: String,
    secret: Secret,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an account.
    pub fn with_account(self, identifier: &str, secret: &str) -> Self {
        self.insert(identifier, Secret::new(secret));
        self
    }

    /// Identifiers that were sent reset instructions, oldest first.
    pub fn resets_sent(&self) -> Vec<String> {
        self.resets.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn insert(&self, identifier: &str, secret: Secret) -> SessionRef {
        let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::Relaxed) + 1);
        let session = SessionRef {
            uid: uid.clone(),
            identifier: identifier.to_string(),
        };
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                identifier.to_lowercase(),
                Account {
                    uid,
                    identifier: identifier.to_string(),
                    secret,
                },
            );
        session
    }

    fn no_such_user() -> ProviderError {
        ProviderError::new(
            error_code::USER_NOT_FOUND,
            "There is no user record corresponding to this identifier.",
        )
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in(&self, identifier: &str, secret: &Secret) -> Result<SessionRef, ProviderError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .get(&identifier.to_lowercase())
            .ok_or_else(Self::no_such_user)?;
        if account.secret != *secret {
            return Err(ProviderError::new(
                error_code::WRONG_PASSWORD,
                "The password is invalid or the user does not have a password.",
            ));
        }
        Ok(SessionRef {
            uid: account.uid.clone(),
            identifier: account.identifier.clone(),
        })
    }

    async fn create_account(&self, identifier: &str, secret: &Secret) -> Result<SessionRef, ProviderError> {
        if self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&identifier.to_lowercase())
        {
            return Err(ProviderError::new(
                error_code::EMAIL_IN_USE,
                "The email address is already in use by another account.",
            ));
        }
        if secret.expose().chars().count() < MIN_SECRET_LEN {
            return Err(ProviderError::new(
                error_code::WEAK_PASSWORD,
                format!("The password must be {MIN_SECRET_LEN} characters long or more."),
            ));
        }
        Ok(self.insert(identifier, secret.clone()))
    }

    async fn send_password_reset(&self, identifier: &str) -> Result<(), ProviderError> {
        let known = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&identifier.to_lowercase());
        if !known {
            return Err(Self::no_such_user());
        }
        self.resets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(identifier.to_string());
        Ok(())
    }
}
