//! # Sale Commands
//!
//! Checkout, plus everything the sales-history view does with the ledger.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  checkout("400")                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_sale(cart, "400", 12%, now, ledger ids)                          │
//! │       │  EmptyCart / MissingCash / InsufficientCash ──► Err, no writes  │
//! │       ▼                                                                 │
//! │  sales().append(sale) ─────────── fails ──────────────► Err, no writes  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart().clear() ────────────────── fails ──► sales().delete(sale.id)   │
//! │       │                                      (rollback) ──► Err        │
//! │       ▼                                                                 │
//! │  clear in-memory cart ──► ReceiptResponse { sale, receipt, text }       │
//! │                                                                         │
//! │  The cart write lock is held from the snapshot to the in-memory clear.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use vendure_core::checkout::build_sale;
use vendure_core::export::{export_csv, CSV_EXPORT_FILE_NAME};
use vendure_core::ledger::filter_by_date_range;
use vendure_core::{CoreError, DateRange, RangePreset, Receipt, Sale};
use vendure_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState, ConfirmState, ConfirmationRequest, PendingAction, StoreState};

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    /// The sale as recorded in the ledger
    pub sale: Sale,
    pub receipt: Receipt,
    /// Fixed-width rendering for the on-screen receipt
    pub text: String,
}

/// CSV download handed to the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// Completes the sale for the current cart.
///
/// ## Arguments
/// * `cash` - Cash received, as typed (e.g. `"400"`, `"386.4"`)
///
/// ## Errors
/// - `EMPTY_CART`, `MISSING_CASH`, `INSUFFICIENT_CASH`: nothing is written
/// - `STORAGE_ERROR`: the ledger and the cart are left as they were
pub async fn checkout<S: KeyValueStore>(
    store: &StoreState<S>,
    cart: &CartState,
    config: &ConfigState,
    cash: &str,
) -> Result<ReceiptResponse, ApiError> {
    debug!(cash = %cash, "checkout command");

    let _write = cart.begin_write().await;
    let current = cart.snapshot();
    let sales = store.inner().sales();
    let existing_ids = sales.ids().await?;

    let sale = build_sale(&current, cash, config.tax_rate(), Utc::now(), existing_ids)?;
    sales.append(&sale).await?;

    if let Err(e) = store.inner().cart().clear().await {
        error!(sale_id = sale.id, error = %e, "Failed to clear cart after checkout, rolling back sale");
        if let Err(rollback) = sales.delete(sale.id).await {
            error!(sale_id = sale.id, error = %rollback, "Rollback failed, sale remains in ledger");
        }
        return Err(e.into());
    }

    cart.clear();

    let receipt = Receipt::from_sale(&sale);
    let text = receipt.render_text(&config.receipt_layout());

    info!(
        sale_id = sale.id,
        total = %config.format_currency(sale.grand_total().cents()),
        change = %config.format_currency(sale.change_cents),
        "Sale completed"
    );

    Ok(ReceiptResponse { sale, receipt, text })
}

/// Sales whose UTC day falls within `range`, in ledger order.
pub async fn list_sales<S: KeyValueStore>(
    store: &StoreState<S>,
    range: &DateRange,
) -> Result<Vec<Sale>, ApiError> {
    debug!(from = ?range.from, to = ?range.to, "list_sales command");

    let sales = store.inner().sales().load().await?;
    Ok(filter_by_date_range(&sales, range))
}

/// Parses the date filter inputs (`YYYY-MM-DD`, empty for open-ended).
pub fn parse_range(from: &str, to: &str) -> Result<DateRange, ApiError> {
    Ok(DateRange::parse(from, to)?)
}

/// Resolves a preset button against the current UTC time.
pub fn range_for_preset(preset: RangePreset) -> DateRange {
    preset.resolve(Utc::now())
}

/// Exports the sales within `range` as CSV.
pub async fn export_sales_csv<S: KeyValueStore>(
    store: &StoreState<S>,
    config: &ConfigState,
    range: &DateRange,
) -> Result<CsvExport, ApiError> {
    debug!(from = ?range.from, to = ?range.to, "export_sales_csv command");

    let sales = list_sales(store, range).await?;
    let content = export_csv(&sales, &config.currency_symbol)?;

    Ok(CsvExport {
        file_name: CSV_EXPORT_FILE_NAME.to_string(),
        content,
    })
}

async fn find_sale<S: KeyValueStore>(store: &StoreState<S>, id: i64) -> Result<Sale, ApiError> {
    store
        .inner()
        .sales()
        .load()
        .await?
        .into_iter()
        .find(|sale| sale.id == id)
        .ok_or_else(|| CoreError::SaleNotFound(id).into())
}

/// Fixed-width text receipt for a recorded sale.
pub async fn render_receipt_text<S: KeyValueStore>(
    store: &StoreState<S>,
    config: &ConfigState,
    id: i64,
) -> Result<String, ApiError> {
    debug!(id, "render_receipt_text command");
    let sale = find_sale(store, id).await?;
    Ok(Receipt::from_sale(&sale).render_text(&config.receipt_layout()))
}

/// Printable HTML document for a recorded sale.
pub async fn render_receipt_html<S: KeyValueStore>(
    store: &StoreState<S>,
    config: &ConfigState,
    id: i64,
) -> Result<String, ApiError> {
    debug!(id, "render_receipt_html command");
    let sale = find_sale(store, id).await?;
    Ok(Receipt::from_sale(&sale).render_html(&config.receipt_layout()))
}

/// Asks for confirmation before deleting a receipt.
pub fn request_delete_sale(confirmations: &ConfirmState, id: i64) -> ConfirmationRequest {
    debug!(id, "request_delete_sale command");
    confirmations.request(PendingAction::DeleteSale(id))
}

/// Removes a sale from the ledger. Runs on confirmation.
pub(crate) async fn delete_sale<S: KeyValueStore>(
    store: &StoreState<S>,
    id: i64,
) -> Result<bool, ApiError> {
    let deleted = store.inner().sales().delete(id).await?;
    if deleted {
        info!(id, "Sale deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::test_support::{memory_register, FailingStore, YieldingStore};
    use crate::Register;
    use chrono::{Datelike, TimeZone};
    use vendure_core::SaleItem;
    use vendure_store::Store;

    async fn fill_reference_cart<S: KeyValueStore>(register: &Register<S>) {
        for id in [1, 1, 6] {
            add_to_cart(register.store(), register.cart(), register.config(), id)
                .await
                .unwrap();
        }
    }

    fn recorded_sale(id: i64, y: i32, m: u32, d: u32) -> Sale {
        Sale {
            id,
            date: Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap(),
            items: vec![
                SaleItem {
                    name: "Big Mac".to_string(),
                    price_cents: 15000,
                    quantity: 2,
                },
                SaleItem {
                    name: "Fries (Small)".to_string(),
                    price_cents: 4500,
                    quantity: 1,
                },
            ],
            subtotal_cents: 34500,
            tax_cents: 4140,
            cash_cents: 40000,
            change_cents: 1360,
        }
    }

    #[tokio::test]
    async fn test_reference_checkout() {
        let register = memory_register().await;
        fill_reference_cart(&register).await;

        let response = checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap();

        assert_eq!(response.sale.subtotal_cents, 34500);
        assert_eq!(response.sale.tax_cents, 4140);
        assert_eq!(response.sale.grand_total().cents(), 38640);
        assert_eq!(response.sale.cash_cents, 40000);
        assert_eq!(response.sale.change_cents, 1360);
        assert_eq!(response.receipt.grand_total.cents(), 38640);
        assert!(response.text.contains("Big Mac × 2"));
        assert!(response.text.contains("₱386.40"));

        assert!(register.cart().snapshot().is_empty());
        assert!(register.store().inner().cart().load().await.unwrap().is_empty());

        let ledger = register.store().inner().sales().load().await.unwrap();
        assert_eq!(ledger, vec![response.sale]);
    }

    #[tokio::test]
    async fn test_double_submit_is_rejected() {
        let register = memory_register().await;
        fill_reference_cart(&register).await;

        checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap();
        let err = checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(register.store().inner().sales().ids().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_or_missing_cash_changes_nothing() {
        let register = memory_register().await;
        fill_reference_cart(&register).await;
        let before = register.cart().snapshot();

        let short = checkout(register.store(), register.cart(), register.config(), "300")
            .await
            .unwrap_err();
        assert_eq!(short.code, ErrorCode::InsufficientCash);

        let missing = checkout(register.store(), register.cart(), register.config(), "")
            .await
            .unwrap_err();
        assert_eq!(missing.code, ErrorCode::MissingCash);

        let garbage = checkout(register.store(), register.cart(), register.config(), "12.345")
            .await
            .unwrap_err();
        assert_eq!(garbage.code, ErrorCode::MissingCash);

        assert_eq!(register.cart().snapshot(), before);
        assert_eq!(register.store().inner().cart().load().await.unwrap(), before);
        assert!(register.store().inner().sales().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exact_cash_gives_zero_change() {
        let register = memory_register().await;
        fill_reference_cart(&register).await;

        let response = checkout(register.store(), register.cart(), register.config(), "386.40")
            .await
            .unwrap();
        assert_eq!(response.sale.change_cents, 0);
    }

    #[tokio::test]
    async fn test_failed_cart_clear_rolls_back_sale() {
        let failing = FailingStore::new();
        let register = Register::with_store(Store::new(failing.clone()), ConfigState::default())
            .await
            .unwrap();
        fill_reference_cart(&register).await;
        let before = register.cart().snapshot();

        failing.fail_writes_to("cart");
        let err = checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(register.store().inner().sales().load().await.unwrap().is_empty());
        assert_eq!(register.cart().snapshot(), before);
        assert_eq!(register.store().inner().cart().load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_append_changes_nothing() {
        let failing = FailingStore::new();
        let register = Register::with_store(Store::new(failing.clone()), ConfigState::default())
            .await
            .unwrap();
        fill_reference_cart(&register).await;

        failing.fail_writes_to("sales");
        let err = checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(register.cart().snapshot().total_quantity(), 3);
    }

    #[tokio::test]
    async fn test_sale_ids_are_unique() {
        let register = memory_register().await;
        let mut ids = Vec::new();
        for _ in 0..3 {
            add_to_cart(register.store(), register.cart(), register.config(), 2)
                .await
                .unwrap();
            let response = checkout(register.store(), register.cart(), register.config(), "1000")
                .await
                .unwrap();
            ids.push(response.sale.id);
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_list_and_export_by_range() {
        let register = memory_register().await;
        let ledger = vec![
            recorded_sale(1, 2026, 10, 1),
            recorded_sale(2, 2026, 10, 15),
            recorded_sale(3, 2026, 11, 2),
        ];
        register.store().inner().sales().save_all(&ledger).await.unwrap();

        let october = parse_range("2026-10-01", "2026-10-31").unwrap();
        let listed = list_sales(register.store(), &october).await.unwrap();
        assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

        let all = list_sales(register.store(), &DateRange::all()).await.unwrap();
        assert_eq!(all.len(), 3);

        let export = export_sales_csv(register.store(), register.config(), &october)
            .await
            .unwrap();
        assert_eq!(export.file_name, "sales-export.csv");

        let rows: Vec<&str> = export.content.lines().collect();
        assert_eq!(rows[0], "Receipt ID,Date,Item,Qty,Price,Total,Cash,Change");
        assert_eq!(rows.len(), 1 + 4);
        assert_eq!(
            rows[1],
            "1,2026-10-01 09:30:00,Big Mac,2,₱150.00,₱386.40,₱400.00,₱13.60"
        );
        assert_eq!(rows[2], ",,Fries (Small),1,₱45.00,,,");
    }

    #[tokio::test]
    async fn test_export_matches_receipt_figures() {
        let register = memory_register().await;
        fill_reference_cart(&register).await;
        let response = checkout(register.store(), register.cart(), register.config(), "400")
            .await
            .unwrap();

        let export = export_sales_csv(register.store(), register.config(), &DateRange::all())
            .await
            .unwrap();
        let first_row = export.content.lines().nth(1).unwrap();
        let total = response.receipt.grand_total.format_with("₱");
        let change = response.receipt.change.format_with("₱");
        assert!(first_row.ends_with(&format!("{},₱400.00,{}", total, change)));

        let text = render_receipt_text(register.store(), register.config(), response.sale.id)
            .await
            .unwrap();
        assert_eq!(text, response.text);
    }

    #[tokio::test]
    async fn test_invalid_range_is_validation_error() {
        let err = parse_range("10/01/2026", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_range_for_preset() {
        let today = Utc::now().date_naive();
        let range = range_for_preset(RangePreset::ThisMonth);
        assert_eq!(range.from.map(|d| d.day()), Some(1));
        assert!(range.contains(today));
        assert!(range_for_preset(RangePreset::AllTime).is_unbounded());
    }

    #[tokio::test]
    async fn test_render_unknown_sale() {
        let register = memory_register().await;
        let err = render_receipt_html(register.store(), register.config(), 42)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Sale not found: 42");
    }

    #[tokio::test]
    async fn test_render_html() {
        let register = memory_register().await;
        register
            .store()
            .inner()
            .sales()
            .save_all(&[recorded_sale(7, 2026, 10, 17)])
            .await
            .unwrap();

        let html = render_receipt_html(register.store(), register.config(), 7)
            .await
            .unwrap();
        assert!(html.contains("<title>Receipt #7</title>"));
        assert!(html.contains("window.print(); window.close();"));
    }

    #[tokio::test]
    async fn test_add_during_checkout_lands_in_next_cart() {
        let register = Register::with_store(Store::new(YieldingStore::new()), ConfigState::default())
            .await
            .unwrap();
        let (store, cart, config) = (register.store(), register.cart(), register.config());
        add_to_cart(store, cart, config, 1).await.unwrap();

        let (sold, added) = tokio::join!(
            checkout(store, cart, config, "1000"),
            add_to_cart(store, cart, config, 6),
        );
        let sold = sold.unwrap();
        added.unwrap();

        assert_eq!(sold.sale.items.len(), 1);
        assert_eq!(sold.sale.items[0].name, "Big Mac");

        let open = cart.snapshot();
        assert_eq!(open.lines.len(), 1);
        assert_eq!(open.lines[0].product_id, 6);
        assert_eq!(store.inner().cart().load().await.unwrap(), open);
    }
}
