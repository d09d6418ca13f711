//! # Confirmation State
//!
//! Destructive actions (clearing the cart, deleting a receipt, deleting a
//! product) run in two phases: a `request_*` command parks the action under a
//! fresh token and returns the prompt, then `confirm(token)` runs it or
//! `cancel(token)` drops it.
//!
//! ```text
//! request_delete_sale(42) ──► { token: "5f0c…", prompt: "Are you sure …" }
//!                                     │
//!                ┌────────────────────┴────────────────────┐
//!                ▼                                         ▼
//!         confirm("5f0c…")                          cancel("5f0c…")
//!         take() → DeleteSale(42) → run             take() → dropped
//!                │                                         │
//!                ▼                                         ▼
//!         token gone; a second confirm is CONFIRMATION_NOT_FOUND
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An action waiting for the cashier's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum PendingAction {
    ClearCart,
    DeleteSale(i64),
    DeleteProduct(i64),
}

impl PendingAction {
    /// Question shown in the confirmation dialog.
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::ClearCart => "Clear cart?",
            PendingAction::DeleteSale(_) => "Are you sure you want to delete this receipt?",
            PendingAction::DeleteProduct(_) => "Delete this product?",
        }
    }
}

/// Returned by the `request_*` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub token: String,
    pub prompt: String,
}

/// Pending confirmations keyed by token.
#[derive(Debug, Clone, Default)]
pub struct ConfirmState {
    pending: Arc<Mutex<HashMap<Uuid, PendingAction>>>,
}

impl ConfirmState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, PendingAction>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Parks `action` under a new token.
    pub fn request(&self, action: PendingAction) -> ConfirmationRequest {
        let token = Uuid::new_v4();
        self.lock().insert(token, action);

        ConfirmationRequest {
            token: token.to_string(),
            prompt: action.prompt().to_string(),
        }
    }

    /// Removes and returns the action for `token`.
    ///
    /// Malformed, unknown and already-used tokens all give `None`.
    pub fn take(&self, token: &str) -> Option<PendingAction> {
        let token = Uuid::parse_str(token.trim()).ok()?;
        self.lock().remove(&token)
    }

    /// Drops the action for `token`; `false` if there was none.
    pub fn discard(&self, token: &str) -> bool {
        self.take(token).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }
}
