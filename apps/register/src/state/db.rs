//! # Store State
//!
//! Wraps the `Store` handle for use in register commands.
//!
//! ## Thread Safety
//! Every backend synchronizes internally (`RwLock` map, filesystem, SQLite
//! pool), so commands share the handle without extra locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_products<S: KeyValueStore>(
//!     store: &StoreState<S>,
//! ) -> Result<Vec<Product>, ApiError> {
//!     Ok(store.inner().catalog().load().await?)
//! }
//! ```

use vendure_store::{KeyValueStore, Store};

/// Wrapper around `Store` for register state management.
#[derive(Debug)]
pub struct StoreState<S> {
    store: Store<S>,
}

impl<S> Clone for StoreState<S> {
    fn clone(&self) -> Self {
        StoreState {
            store: self.store.clone(),
        }
    }
}

impl<S: KeyValueStore> StoreState<S> {
    pub fn new(store: Store<S>) -> Self {
        StoreState { store }
    }

    /// Returns a reference to the inner Store.
    pub fn inner(&self) -> &Store<S> {
        &self.store
    }
}
