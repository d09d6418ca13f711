//! # Cart State
//!
//! Holds the open cart in memory, mirroring the persisted `cart` document.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because several commands read and
//! modify it, and only one of them may modify it at a time.
//!
//! Mutating commands await the store between taking their copy and
//! replacing the cart, so they also hold the write lock from
//! [`CartState::begin_write`] for that whole span. The std mutex is never
//! held across an `.await`; the tokio one is.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action               Command                  Cart State Change     │
//! │  ─────────               ───────                  ─────────────────     │
//! │                                                                         │
//! │  Tap Product ────────────► add_to_cart() ───────► merge or push line   │
//! │                                                                         │
//! │  Tap + / - ──────────────► change_quantity() ───► qty += delta         │
//! │                                                 (qty ≤ 0 drops line)   │
//! │                                                                         │
//! │  Confirm Clear ──────────► confirm(token) ──────► lines.clear()        │
//! │                                                                         │
//! │  Checkout ───────────────► checkout() ──────────► lines.clear()        │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Commands take the write lock, mutate a copy, persist it, then   │
//! │        `replace()` the in-memory cart, so a failed write leaves        │
//! │        memory untouched and concurrent taps are applied in turn.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use vendure_core::Cart;

/// Register-managed cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    writes: Arc<tokio::sync::Mutex<()>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates cart state from a cart restored from the store.
    pub fn restored(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
            writes: Arc::default(),
        }
    }

    /// Waits for exclusive use of the cart for a snapshot, persist, replace
    /// sequence. Release the guard after `replace()` or `clear()`.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let _write = cart_state.begin_write().await;
    /// let mut next = cart_state.snapshot();
    /// next.add_product(&product)?;
    /// store.cart().save(&next).await?;
    /// cart_state.replace(next);
    /// ```
    pub async fn begin_write(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.writes.lock().await
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| compute_totals(cart, rate));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    /// Swaps in a cart that has already been persisted.
    pub fn replace(&self, cart: Cart) {
        self.with_cart_mut(|current| *current = cart);
    }

    pub fn clear(&self) {
        self.with_cart_mut(Cart::clear);
    }
}
