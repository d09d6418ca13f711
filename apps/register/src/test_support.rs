//! Shared fixtures for the command tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use vendure_store::{KeyValueStore, MemoryStore, Store, StoreError, StoreResult};

use crate::state::ConfigState;
use crate::Register;

/// Register over a fresh in-memory store, catalog seeded.
pub(crate) async fn memory_register() -> Register<MemoryStore> {
    Register::with_store(Store::new(MemoryStore::new()), ConfigState::default())
        .await
        .unwrap()
}

/// Memory store whose writes to chosen keys fail on demand.
#[derive(Debug, Clone, Default)]
pub(crate) struct FailingStore {
    inner: Arc<MemoryStore>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
}

impl FailingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    fn check(&self, key: &str) -> StoreResult<()> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("injected write failure for {key}"),
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(key)?;
        self.inner.remove(key).await
    }
}

/// Memory store that yields to the scheduler before every read and write,
/// so concurrently joined commands interleave at each store call.
#[derive(Debug, Clone, Default)]
pub(crate) struct YieldingStore {
    inner: Arc<MemoryStore>,
}

impl YieldingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for YieldingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        tokio::task::yield_now().await;
        self.inner.remove(key).await
    }
}
