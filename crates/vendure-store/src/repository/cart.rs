//! # Cart Repository
//!
//! The open cart under the `cart` key, stored as the ordered list of lines.
//! The register saves it after every mutation so a restart resumes the same
//! customer.

use std::sync::Arc;

use tracing::debug;
use vendure_core::{Cart, CartLine};

use super::{read_document, write_document, CART_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Repository for the persisted cart.
#[derive(Debug)]
pub struct CartRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CartRepository<S> {
    fn clone(&self) -> Self {
        CartRepository {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> CartRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        CartRepository { store }
    }

    /// Loads the cart; missing or corrupt documents give an empty cart.
    ///
    /// The stored lines go through [`Cart::from_lines`], so non-positive
    /// quantities are dropped and repeated products come back as one line.
    pub async fn load(&self) -> StoreResult<Cart> {
        let lines = read_document::<_, Vec<CartLine>>(&*self.store, CART_KEY)
            .await?
            .unwrap_or_default();
        let stored = lines.len();
        let cart = Cart::from_lines(lines);

        if cart.line_count() != stored {
            debug!(stored, lines = cart.line_count(), "Normalized stored cart lines");
        }
        debug!(lines = cart.line_count(), "Loaded cart");
        Ok(cart)
    }

    pub async fn save(&self, cart: &Cart) -> StoreResult<()> {
        write_document(&*self.store, CART_KEY, &cart.lines).await
    }

    /// Persists an empty cart.
    pub async fn clear(&self) -> StoreResult<()> {
        self.save(&Cart::new()).await
    }
}
