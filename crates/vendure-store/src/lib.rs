//! # vendure-store: Persistence Layer for Vendure POS
//!
//! Stores the register's three documents (catalog, cart, sales ledger) in a
//! pluggable key-value backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendure POS Data Flow                            │
//! │                                                                         │
//! │  Register command (checkout)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vendure-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store<S>   │    │ Repositories  │    │  Backends    │  │   │
//! │  │   │   (lib.rs)    │    │               │    │              │  │   │
//! │  │   │               │    │ CatalogRepo   │    │ MemoryStore  │  │   │
//! │  │   │ Arc<S>        │◄───│ CartRepo      │───►│ FileStore    │  │   │
//! │  │   │               │    │ SalesRepo     │    │ SqliteStore  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/vendure-pos/vendure.db  (or <dir>/*.json)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValueStore` trait, memory backend, runtime backend enum
//! - [`file`] - JSON-file backend
//! - [`pool`] - SQLite pool and backend
//! - [`migrations`] - Embedded SQLite migrations
//! - [`repository`] - Catalog, cart and sales documents
//! - [`seed`] - Default menu
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vendure_store::{SqliteConfig, SqliteStore, Store};
//!
//! let backend = SqliteStore::connect(SqliteConfig::new("vendure.db")).await?;
//! let store = Store::new(backend);
//!
//! let products = store.catalog().load().await?; // seeds on first run
//! let ledger = store.sales().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore, StoreBackend};
pub use pool::{SqliteConfig, SqliteStore};
pub use repository::{CartRepository, CatalogRepository, SalesRepository};

use std::sync::Arc;

// =============================================================================
// Store Handle
// =============================================================================

/// Shared handle over a backend, handing out repositories.
///
/// Cloning is cheap; all clones talk to the same backend.
#[derive(Debug)]
pub struct Store<S> {
    backend: Arc<S>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Store {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<S>) -> Self {
        Store { backend }
    }

    /// Raw backend access, for diagnostics and tests.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn catalog(&self) -> CatalogRepository<S> {
        CatalogRepository::new(Arc::clone(&self.backend))
    }

    pub fn cart(&self) -> CartRepository<S> {
        CartRepository::new(Arc::clone(&self.backend))
    }

    pub fn sales(&self) -> SalesRepository<S> {
        SalesRepository::new(Arc::clone(&self.backend))
    }
}
