//! # Sales Repository
//!
//! The ledger under the `sales` key, in insertion (= chronological) order.
//!
//! Every mutation is a whole-document read-modify-write. Two processes
//! writing the same store can lose each other's updates; the register runs
//! as a single process.

use std::sync::Arc;

use tracing::debug;
use vendure_core::Sale;

use super::{read_document, write_document, SALES_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Repository for the sales ledger.
#[derive(Debug)]
pub struct SalesRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for SalesRepository<S> {
    fn clone(&self) -> Self {
        SalesRepository {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> SalesRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        SalesRepository { store }
    }

    /// Loads the ledger; missing or corrupt documents give an empty ledger.
    pub async fn load(&self) -> StoreResult<Vec<Sale>> {
        let sales = read_document::<_, Vec<Sale>>(&*self.store, SALES_KEY)
            .await?
            .unwrap_or_default();
        debug!(count = sales.len(), "Loaded sales");
        Ok(sales)
    }

    /// Appends a sale at the end of the ledger.
    pub async fn append(&self, sale: &Sale) -> StoreResult<()> {
        let mut sales = self.load().await?;
        sales.push(sale.clone());
        debug!(id = sale.id, count = sales.len(), "Appending sale");
        self.save_all(&sales).await
    }

    /// Removes the sale with `id`. Returns `false` (and writes nothing) when
    /// no such sale exists.
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut sales = self.load().await?;
        let before = sales.len();
        sales.retain(|sale| sale.id != id);

        if sales.len() == before {
            return Ok(false);
        }

        self.save_all(&sales).await?;
        Ok(true)
    }

    /// Replaces the whole ledger.
    pub async fn save_all(&self, sales: &[Sale]) -> StoreResult<()> {
        write_document(&*self.store, SALES_KEY, sales).await
    }

    /// Ids currently in the ledger.
    pub async fn ids(&self) -> StoreResult<Vec<i64>> {
        Ok(self.load().await?.iter().map(|sale| sale.id).collect())
    }
}
