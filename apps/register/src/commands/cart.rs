//! # Cart Commands
//!
//! Commands behind the POS view's cart panel.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Cash    │────►│  Sale    │       │
//! │  │  Cart    │     │          │     │  Entered │     │ Recorded │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout                           │
//! │                   change_quantity   (sale.rs)                          │
//! │                   preview_change                                       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   request_clear_cart + confirm ────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation holds the cart's write lock while it is applied to a copy
//! of the cart, persisted, and only then swapped into memory.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vendure_core::cart::{compute_change, compute_totals};
use vendure_core::{Cart, CartLine, CartTotals, CoreError, Money, TaxRate};
use vendure_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState, ConfirmState, ConfirmationRequest, PendingAction, StoreState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn new(cart: &Cart, rate: TaxRate) -> Self {
        CartResponse {
            lines: cart.lines.clone(),
            totals: compute_totals(cart, rate),
        }
    }
}

/// Live change shown under the cash field while the cashier types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePreview {
    pub grand_total: Money,
    /// `None` while the cash field is empty or unparseable
    pub change: Option<Money>,
    /// Whether checkout would accept this cash amount
    pub sufficient: bool,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart panel (always visible on the POS view)                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Big Mac                 ₱150.00   [-] 2 [+]       ₱300.00    │    │
/// │  │  Fries (Small)            ₱45.00   [-] 1 [+]        ₱45.00    │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                          ₱345.00    │    │
/// │  │  Tax (12%)                                          ₱41.40    │    │
/// │  │  TOTAL                                             ₱386.40    │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::new(c, config.tax_rate()))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity + 1
/// - Product not in cart: new line with the current name and price
///
/// ## Errors
/// - `NOT_FOUND` when the id is not in the catalog
/// - `VALIDATION_ERROR` when the line is already at the quantity cap
/// - `STORAGE_ERROR` when the cart could not be persisted (memory unchanged)
pub async fn add_to_cart<S: KeyValueStore>(
    store: &StoreState<S>,
    cart: &CartState,
    config: &ConfigState,
    product_id: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");

    let products = store.inner().catalog().load().await?;
    let product = products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let _write = cart.begin_write().await;
    let mut next = cart.snapshot();
    next.add_product(product)?;
    store.inner().cart().save(&next).await?;

    let response = CartResponse::new(&next, config.tax_rate());
    cart.replace(next);
    Ok(response)
}

/// Changes a line's quantity by `delta` (the `+` / `-` buttons).
///
/// A quantity that falls to zero or below removes the line. A product that is
/// not in the cart leaves everything unchanged, and so does a `delta` that
/// would push the line past the quantity cap (`VALIDATION_ERROR`).
pub async fn change_quantity<S: KeyValueStore>(
    store: &StoreState<S>,
    cart: &CartState,
    config: &ConfigState,
    product_id: i64,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, delta, "change_quantity command");

    let _write = cart.begin_write().await;
    let mut next = cart.snapshot();
    if !next.change_quantity(product_id, delta)? {
        return Ok(CartResponse::new(&next, config.tax_rate()));
    }

    store.inner().cart().save(&next).await?;

    let response = CartResponse::new(&next, config.tax_rate());
    cart.replace(next);
    Ok(response)
}

/// Computes the change for the cash typed so far. Writes nothing.
pub fn preview_change(cart: &CartState, config: &ConfigState, cash: &str) -> ChangePreview {
    let totals = cart.with_cart(|c| compute_totals(c, config.tax_rate()));
    let change = compute_change(totals.grand_total, cash).ok();

    ChangePreview {
        grand_total: totals.grand_total,
        change,
        sufficient: totals.item_count > 0 && change.is_some_and(|c| !c.is_negative()),
    }
}

/// Asks for confirmation before clearing the cart.
pub fn request_clear_cart(confirmations: &ConfirmState) -> ConfirmationRequest {
    debug!("request_clear_cart command");
    confirmations.request(PendingAction::ClearCart)
}

/// Empties the cart in the store, then in memory. Runs on confirmation.
pub(crate) async fn clear_cart<S: KeyValueStore>(
    store: &StoreState<S>,
    cart: &CartState,
) -> Result<(), ApiError> {
    let _write = cart.begin_write().await;
    store.inner().cart().clear().await?;
    cart.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{memory_register, FailingStore, YieldingStore};
    use crate::Register;
    use vendure_store::Store;

    #[tokio::test]
    async fn test_add_and_merge() {
        let register = memory_register().await;
        let (store, cart, config) = (register.store(), register.cart(), register.config());

        add_to_cart(store, cart, config, 1).await.unwrap();
        add_to_cart(store, cart, config, 1).await.unwrap();
        let response = add_to_cart(store, cart, config, 6).await.unwrap();

        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.lines[0].quantity, 2);
        assert_eq!(response.totals.subtotal.cents(), 34500);
        assert_eq!(response.totals.tax.cents(), 4140);
        assert_eq!(response.totals.grand_total.cents(), 38640);

        // persisted copy matches memory
        let persisted = store.inner().cart().load().await.unwrap();
        assert_eq!(persisted, cart.snapshot());
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let register = memory_register().await;
        let err = add_to_cart(register.store(), register.cart(), register.config(), 999)
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        assert!(register.cart().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_change_quantity_removes_line_at_zero() {
        let register = memory_register().await;
        let (store, cart, config) = (register.store(), register.cart(), register.config());
        add_to_cart(store, cart, config, 6).await.unwrap();

        let response = change_quantity(store, cart, config, 6, 2).await.unwrap();
        assert_eq!(response.lines[0].quantity, 3);

        let response = change_quantity(store, cart, config, 6, -3).await.unwrap();
        assert!(response.lines.is_empty());
        assert!(store.inner().cart().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_change_quantity_unknown_line_is_noop() {
        let register = memory_register().await;
        let (store, cart, config) = (register.store(), register.cart(), register.config());
        add_to_cart(store, cart, config, 1).await.unwrap();

        let response = change_quantity(store, cart, config, 2, 1).await.unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].product_id, 1);
    }

    #[tokio::test]
    async fn test_preview_change() {
        let register = memory_register().await;
        let (cart, config) = (register.cart(), register.config());

        let empty = preview_change(cart, config, "100");
        assert!(!empty.sufficient);

        add_to_cart(register.store(), cart, config, 1).await.unwrap();
        add_to_cart(register.store(), cart, config, 1).await.unwrap();
        add_to_cart(register.store(), cart, config, 6).await.unwrap();

        let short = preview_change(cart, config, "300");
        assert_eq!(short.change, Some(Money::from_cents(-8640)));
        assert!(!short.sufficient);

        let paid = preview_change(cart, config, "400");
        assert_eq!(paid.change, Some(Money::from_cents(1360)));
        assert!(paid.sufficient);

        let blank = preview_change(cart, config, "");
        assert_eq!(blank.change, None);
        assert_eq!(blank.grand_total.cents(), 38640);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_memory_untouched() {
        let failing = FailingStore::new();
        let register = Register::with_store(Store::new(failing.clone()), ConfigState::default())
            .await
            .unwrap();

        failing.fail_writes_to("cart");
        let err = add_to_cart(register.store(), register.cart(), register.config(), 1)
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::StorageError);
        assert!(register.cart().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_quantity_cap_is_validation_error() {
        let register = memory_register().await;
        let (store, cart, config) = (register.store(), register.cart(), register.config());
        add_to_cart(store, cart, config, 1).await.unwrap();

        let err = change_quantity(store, cart, config, 1, i64::MAX).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.snapshot().lines[0].quantity, 1);

        let response = change_quantity(store, cart, config, 1, 9_998).await.unwrap();
        assert_eq!(response.lines[0].quantity, 9_999);

        let err = add_to_cart(store, cart, config, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.inner().cart().load().await.unwrap().lines[0].quantity, 9_999);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let register = Register::with_store(Store::new(YieldingStore::new()), ConfigState::default())
            .await
            .unwrap();
        let (store, cart, config) = (register.store(), register.cart(), register.config());

        let (first, second) = tokio::join!(
            add_to_cart(store, cart, config, 1),
            add_to_cart(store, cart, config, 1),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(cart.snapshot().total_quantity(), 2);
        assert_eq!(store.inner().cart().load().await.unwrap().total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_quantity_changes_apply_in_turn() {
        let register = Register::with_store(Store::new(YieldingStore::new()), ConfigState::default())
            .await
            .unwrap();
        let (store, cart, config) = (register.store(), register.cart(), register.config());
        add_to_cart(store, cart, config, 6).await.unwrap();
        add_to_cart(store, cart, config, 6).await.unwrap();

        let (a, b, c) = tokio::join!(
            change_quantity(store, cart, config, 6, 3),
            add_to_cart(store, cart, config, 6),
            change_quantity(store, cart, config, 6, -1),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(cart.snapshot().lines[0].quantity, 5);
        assert_eq!(store.inner().cart().load().await.unwrap(), cart.snapshot());
    }
}
