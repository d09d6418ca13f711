//! # Catalog Repository
//!
//! The ordered product list under the `catalog` key.
//!
//! ## First Run
//! ```text
//! load()
//!   │
//!   ├── key present, decodes ──────────────► stored products, unchanged
//!   │
//!   └── key missing or corrupt ──► seed ──► save ──► seed products
//! ```

use std::sync::Arc;

use tracing::{debug, info};
use vendure_core::Product;

use super::{read_document, write_document, CATALOG_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;
use crate::seed::default_catalog;

/// Repository for the product catalog.
#[derive(Debug)]
pub struct CatalogRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CatalogRepository<S> {
    fn clone(&self) -> Self {
        CatalogRepository {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> CatalogRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        CatalogRepository { store }
    }

    /// Loads the catalog, installing and persisting the seed menu when none
    /// is stored yet.
    pub async fn load(&self) -> StoreResult<Vec<Product>> {
        if let Some(products) = read_document::<_, Vec<Product>>(&*self.store, CATALOG_KEY).await? {
            debug!(count = products.len(), "Loaded catalog");
            return Ok(products);
        }

        let seeded = default_catalog();
        self.save(&seeded).await?;
        info!(count = seeded.len(), "Seeded catalog");
        Ok(seeded)
    }

    /// Replaces the stored catalog.
    pub async fn save(&self, products: &[Product]) -> StoreResult<()> {
        debug!(count = products.len(), "Saving catalog");
        write_document(&*self.store, CATALOG_KEY, products).await
    }

    /// Number of products (seeding first if needed).
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.load().await?.len())
    }
}
