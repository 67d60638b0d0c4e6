//! Auth token storage.
//!
//! The gateway only ever reads the token through [`TokenStore::get`]. Writing
//! and clearing belong to the login/logout flows, which go through
//! [`TokenSink`]. The persisted store is the OS keychain via `keyring`
//! (macOS Keychain, Windows Credential Manager, Secret Service on Linux).

use std::sync::RwLock;

use keyring::Entry;
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Keychain service name for persisted credentials.
pub const SERVICE_NAME: &str = "freight-gateway";

/// Fixed keychain key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Keychain operation failed: {0}")]
    Keychain(String),
}

impl From<keyring::Error> for TokenStoreError {
    fn from(err: keyring::Error) -> Self {
        TokenStoreError::Keychain(err.to_string())
    }
}

/// Read-only source of the current bearer token.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when the user is logged out.
    fn get(&self) -> Option<String>;
}

/// Write side of token storage, used by login and logout.
pub trait TokenSink {
    fn store(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Run a blocking keychain call without stalling an async worker thread.
///
/// The Secret Service backend talks D-Bus and blocks, so on a multi-threaded
/// runtime the call is moved out with `block_in_place`.
fn blocking<R>(f: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Token persisted in the OS keychain under a fixed key.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    key: String,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME, TOKEN_KEY)
    }
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
        }
    }

    fn entry(&self) -> Result<Entry, TokenStoreError> {
        Ok(Entry::new(&self.service, &self.key)?)
    }

    /// Read the token, distinguishing "no entry" (`Ok(None)`) from keychain failures.
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        blocking(|| -> Result<Option<String>, TokenStoreError> {
            match self.entry()?.get_password() {
                Ok(token) => Ok(Some(token)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(TokenStoreError::from(e)),
            }
        })
    }
}

impl TokenSink for KeyringTokenStore {
    fn store(&self, token: &str) -> Result<(), TokenStoreError> {
        blocking(|| -> Result<(), TokenStoreError> {
            self.entry()?.set_password(token)?;
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        blocking(|| -> Result<(), TokenStoreError> {
            match self.entry()?.delete_credential() {
                Ok(()) => Ok(()),
                Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(TokenStoreError::from(e)),
            }
        })
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        match self.load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read auth token from keychain: {}", e);
                None
            }
        }
    }
}

/// In-process token holder for embedding the gateway and for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }
}

impl TokenSink for MemoryTokenStore {
    fn store(&self, token: &str) -> Result<(), TokenStoreError> {
        self.set(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        MemoryTokenStore::clear(self);
        Ok(())
    }
}

/// Token fixed at construction, e.g. supplied through the environment.
#[derive(Debug, Clone)]
pub struct StaticTokenStore(String);

impl StaticTokenStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenStore for StaticTokenStore {
    fn get(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
