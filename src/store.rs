//! Credential storage
//!
//! The three session artifacts (access token, refresh token, Google ID
//! token) live behind the `CredentialStore` trait: tests bind an
//! in-memory map, production binds a durable JSON file. Every operation
//! is synchronous and idempotent, and a write is visible to any reader
//! of the same store immediately.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::types::TokenSet;
use crate::Result;

/// The three fixed credential keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    GoogleIdToken,
}

impl CredentialKey {
    /// All keys, in the order they are cleared
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::GoogleIdToken,
    ];

    /// The stored name of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "accessToken",
            CredentialKey::RefreshToken => "refreshToken",
            CredentialKey::GoogleIdToken => "googleIdToken",
        }
    }
}

/// Passive key/value surface holding the session credentials
///
/// `clear` removes all three keys unconditionally and never fails; the
/// store performs no validation, encryption, or expiry tracking.
pub trait CredentialStore: Send + Sync {
    /// Read a single entry; `None` when absent
    fn get(&self, key: CredentialKey) -> Option<String>;

    /// Write a single entry, overwriting any previous value
    fn set(&self, key: CredentialKey, value: &str);

    /// Remove all three entries; absent entries are not an error
    fn clear(&self);

    /// Persist the token pair from a successful login or exchange
    fn save_tokens(&self, tokens: &TokenSet) {
        self.set(CredentialKey::AccessToken, &tokens.access_token);
        self.set(CredentialKey::RefreshToken, &tokens.refresh_token);
    }

    /// Retain the Google ID token so a pending sign-up can complete
    fn save_google_id_token(&self, id_token: &str) {
        self.set(CredentialKey::GoogleIdToken, id_token);
    }
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.entries.lock().unwrap().get(&key).cloned()
    }

    fn set(&self, key: CredentialKey, value: &str) {
        self.entries.lock().unwrap().insert(key, value.to_string());
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap();
        for key in CredentialKey::ALL {
            entries.remove(&key);
        }
    }
}

/// File-backed credential store
///
/// Persists the entries as a JSON object so the session survives a
/// restart of the host shell. Persistence failures are logged and
/// swallowed; the in-memory view stays authoritative for the session.
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Open a store at `path`, loading any previously persisted entries
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Conventional location under the user's home directory
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".authflow")
            .join("credentials.json")
    }

    fn persist(path: &Path, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, content)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    fn persist_or_warn(&self, entries: &HashMap<String, String>) {
        if let Err(err) = Self::persist(&self.path, entries) {
            tracing::warn!("Failed to persist credentials to {:?}: {}", self.path, err);
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.entries.lock().unwrap().get(key.as_str()).cloned()
    }

    fn set(&self, key: CredentialKey, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.as_str().to_string(), value.to_string());
        self.persist_or_warn(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap();
        for key in CredentialKey::ALL {
            entries.remove(key.as_str());
        }
        self.persist_or_warn(&entries);
    }
}
