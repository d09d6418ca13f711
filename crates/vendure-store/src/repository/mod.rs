//! # Repository Module
//!
//! Typed access to the three persisted documents.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Repositories                                │
//! │                                                                         │
//! │  Register command                                                       │
//! │       │                                                                 │
//! │       │  store.sales().append(&sale)                                    │
//! │       ▼                                                                 │
//! │  SalesRepository                                                        │
//! │  ├── load()            read "sales", decode JSON                        │
//! │  ├── append(sale)      load → push → save (whole document)              │
//! │  ├── delete(id)        load → retain → save                             │
//! │  └── save_all(sales)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueStore (memory / file / SQLite)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Corrupt Documents
//! A value that does not decode is logged at `warn!` and treated as absent:
//! the cart and the ledger load empty, the catalog re-seeds. The bad value
//! is overwritten by the next successful save.
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`] - Product list, seeded on first load
//! - [`CartRepository`] - The open cart
//! - [`SalesRepository`] - The sales ledger

pub mod cart;
pub mod catalog;
pub mod sales;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use sales::SalesRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Key of the product list.
pub const CATALOG_KEY: &str = "catalog";
/// Key of the open cart.
pub const CART_KEY: &str = "cart";
/// Key of the sales ledger.
pub const SALES_KEY: &str = "sales";

/// Reads and decodes a document; `None` when missing or corrupt.
pub(crate) async fn read_document<S, T>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt persisted document");
            Ok(None)
        }
    }
}

/// Encodes and writes a whole document.
pub(crate) async fn write_document<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, json).await
}
