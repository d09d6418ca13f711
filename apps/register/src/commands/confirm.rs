//! # Confirmation Commands
//!
//! Second phase of the destructive actions started by `request_clear_cart`,
//! `request_delete_sale` and `request_delete_product`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vendure_store::KeyValueStore;

use crate::commands::{cart, catalog, sale};
use crate::error::ApiError;
use crate::state::{CartState, ConfirmState, PendingAction, StoreState};

/// What a confirmed action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ConfirmOutcome {
    CartCleared,
    /// `deleted` is false when the receipt was already gone
    SaleDeleted { id: i64, deleted: bool },
    ProductDeleted { id: i64, deleted: bool },
}

/// Runs the action parked under `token`. Each token works once.
///
/// ## Errors
/// - `CONFIRMATION_NOT_FOUND` for unknown, cancelled or already used tokens
/// - `STORAGE_ERROR` when the action could not be persisted
pub async fn confirm<S: KeyValueStore>(
    store: &StoreState<S>,
    cart_state: &CartState,
    confirmations: &ConfirmState,
    token: &str,
) -> Result<ConfirmOutcome, ApiError> {
    debug!(token = %token, "confirm command");

    let action = confirmations
        .take(token)
        .ok_or_else(|| ApiError::confirmation_not_found(token))?;

    let outcome = match action {
        PendingAction::ClearCart => {
            cart::clear_cart(store, cart_state).await?;
            info!("Cart cleared");
            ConfirmOutcome::CartCleared
        }
        PendingAction::DeleteSale(id) => ConfirmOutcome::SaleDeleted {
            id,
            deleted: sale::delete_sale(store, id).await?,
        },
        PendingAction::DeleteProduct(id) => ConfirmOutcome::ProductDeleted {
            id,
            deleted: catalog::delete_product(store, id).await?,
        },
    };

    Ok(outcome)
}

/// Drops the action parked under `token` without running it.
pub fn cancel(confirmations: &ConfirmState, token: &str) -> Result<(), ApiError> {
    debug!(token = %token, "cancel command");

    if confirmations.discard(token) {
        Ok(())
    } else {
        Err(ApiError::confirmation_not_found(token))
    }
}
