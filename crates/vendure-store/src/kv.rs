//! # Key-Value Store
//!
//! The storage seam every repository is written against.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStore                                      │
//! │            get(key) / set(key, value) / remove(key)                     │
//! │                                                                         │
//! │   ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐         │
//! │   │ MemoryStore  │    │  FileStore   │    │   SqliteStore    │         │
//! │   │ RwLock<Map>  │    │ <key>.json   │    │ kv_entries table │         │
//! │   │ (tests)      │    │ (portable)   │    │ (default)        │         │
//! │   └──────────────┘    └──────────────┘    └──────────────────┘         │
//! │            ▲                  ▲                    ▲                    │
//! │            └──────────── StoreBackend ─────────────┘                    │
//! │                      (chosen at runtime)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings; the repositories put JSON documents in them.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::file::FileStore;
use crate::pool::SqliteStore;

/// Async string key-value storage.
///
/// Implementations must be safe to share between tasks; the register holds
/// one behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for `key`, `None` when it was never written.
    fn get(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = StoreResult<()>> + Send;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Rejects keys that are empty or contain anything besides ASCII letters,
/// digits, `-` and `_`.
///
/// The file backend turns keys into file names, so a key like `../x` must
/// never reach it.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        validate_key(key)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// =============================================================================
// Runtime-selected Backend
// =============================================================================

/// One of the three backends, picked from configuration at startup.
#[derive(Debug)]
pub enum StoreBackend {
    Memory(MemoryStore),
    File(FileStore),
    Sqlite(SqliteStore),
}

impl StoreBackend {
    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Memory(_) => "memory",
            StoreBackend::File(_) => "file",
            StoreBackend::Sqlite(_) => "sqlite",
        }
    }
}

impl KeyValueStore for StoreBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            StoreBackend::Memory(store) => store.get(key).await,
            StoreBackend::File(store) => store.get(key).await,
            StoreBackend::Sqlite(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        match self {
            StoreBackend::Memory(store) => store.set(key, value).await,
            StoreBackend::File(store) => store.set(key, value).await,
            StoreBackend::Sqlite(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        match self {
            StoreBackend::Memory(store) => store.remove(key).await,
            StoreBackend::File(store) => store.remove(key).await,
            StoreBackend::Sqlite(store) => store.remove(key).await,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
