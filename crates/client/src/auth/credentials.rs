//! Credential pair storage.
//!
//! Tokens persist under two durable keys (`access_token`, `refresh_token`);
//! absence of either key means the session starts unauthenticated. The
//! in-memory cache is authoritative within the process: durable writes are
//! best-effort and never block or fail an operation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// An access/refresh token pair.
///
/// Immutable value: replaced wholesale on login or refresh, never partially
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new<A: Into<String>, R: Into<String>>(access_token: A, refresh_token: R) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Durable key-value medium behind a [`CredentialStore`].
///
/// Implementations must not panic on I/O failure; a failed write is logged by
/// the caller's contract and otherwise ignored.
pub trait TokenStorage: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Ephemeral storage for tests and sessions that should not outlive the
/// process.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// File-backed storage: one JSON object of key-value pairs.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Malformed token file; treating as empty");
                HashMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "Failed to serialize token file");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), error = %err, "Failed to write token file");
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn store(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries);
        }
    }
}

/// Holds the current credential pair for a session.
///
/// Durable storage is read once at construction and cached; `set`/`clear`
/// write through best-effort. `get` reflects the latest `set`/`clear`
/// immediately within the process.
pub struct CredentialStore {
    storage: Box<dyn TokenStorage>,
    cached: RwLock<Option<CredentialPair>>,
}

impl CredentialStore {
    pub fn new<S: TokenStorage + 'static>(storage: S) -> Self {
        let cached = match (
            storage.load(ACCESS_TOKEN_KEY),
            storage.load(REFRESH_TOKEN_KEY),
        ) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(CredentialPair::new(access, refresh))
            }
            _ => None,
        };
        Self {
            storage: Box::new(storage),
            cached: RwLock::new(cached),
        }
    }

    /// A store with no durable backing.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStorage::default())
    }

    pub fn get(&self) -> Option<CredentialPair> {
        self.cached.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.cached.read().as_ref().map(|pair| pair.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.cached.read().as_ref().map(|pair| pair.refresh_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.cached.read().is_some()
    }

    pub fn set(&self, pair: CredentialPair) {
        self.storage.store(ACCESS_TOKEN_KEY, &pair.access_token);
        self.storage.store(REFRESH_TOKEN_KEY, &pair.refresh_token);
        *self.cached.write() = Some(pair);
    }

    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        *self.cached.write() = None;
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = CredentialStore::in_memory();
        assert!(!store.is_authenticated());
        assert_eq!(store.get(), None);

        store.set(CredentialPair::new("A1", "R1"));
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_storage_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        {
            let store = CredentialStore::new(FileTokenStorage::new(&path));
            store.set(CredentialPair::new("A1", "R1"));
        }

        // A fresh store reads the durable state once at construction.
        let store = CredentialStore::new(FileTokenStorage::new(&path));
        assert_eq!(store.get(), Some(CredentialPair::new("A1", "R1")));

        store.clear();
        let store = CredentialStore::new(FileTokenStorage::new(&path));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_missing_key_means_unauthenticated() {
        let storage = MemoryTokenStorage::default();
        storage.store(ACCESS_TOKEN_KEY, "A1");
        // No refresh token stored.
        let store = CredentialStore::new(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_malformed_token_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();

        let store = CredentialStore::new(FileTokenStorage::new(&path));
        assert!(!store.is_authenticated());
    }
}
