//! # Checkout
//!
//! Turns a finalized cart into an immutable [`Sale`].
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout                                        │
//! │                                                                         │
//! │  Cart + cash input                                                      │
//! │       │                                                                 │
//! │       ├── no lines?          → EmptyCart                                │
//! │       ├── cash unparseable?  → MissingCash                              │
//! │       ├── change < 0?        → InsufficientCash                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_sale() ← THIS MODULE (pure, nothing written yet)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Register: append to ledger ──► persist empty cart ──► clear memory     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::cart::{compute_change, compute_totals, Cart};
use crate::error::{CoreError, CoreResult};
use crate::types::{next_timestamp_id, Sale, TaxRate};

/// Builds the sale record for a checkout.
///
/// ## Arguments
/// * `cart` - Cart being paid for
/// * `cash_input` - Cash as typed by the cashier
/// * `rate` - Tax rate applied to the subtotal
/// * `now` - Checkout time (id and date are derived from it)
/// * `existing_ids` - Ids already in the ledger, so the new id is unique
///
/// ## Errors
/// Checked in order: `EmptyCart`, `MissingCash`, `InsufficientCash`.
pub fn build_sale(
    cart: &Cart,
    cash_input: &str,
    rate: TaxRate,
    now: DateTime<Utc>,
    existing_ids: impl IntoIterator<Item = i64>,
) -> CoreResult<Sale> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let totals = compute_totals(cart, rate);
    let change = compute_change(totals.grand_total, cash_input)?;

    if change.is_negative() {
        return Err(CoreError::InsufficientCash {
            due: totals.grand_total,
            tendered: totals.grand_total + change,
        });
    }

    Ok(Sale {
        id: next_timestamp_id(now, existing_ids),
        date: now,
        items: cart.lines.iter().map(|l| l.to_sale_item()).collect(),
        subtotal_cents: totals.subtotal.cents(),
        tax_cents: totals.tax.cents(),
        cash_cents: (totals.grand_total + change).cents(),
        change_cents: change.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;
    use chrono::TimeZone;

    fn reference_cart() -> Cart {
        let mut cart = Cart::new();
        let big_mac = Product::new(1, "Big Mac", Money::from_cents(15000));
        let fries = Product::new(6, "Fries (Small)", Money::from_cents(4500));
        cart.add_product(&big_mac).unwrap();
        cart.add_product(&big_mac).unwrap();
        cart.add_product(&fries).unwrap();
        cart
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 6, 30, 0).unwrap()
    }

    #[test]
    fn test_build_sale_reference_scenario() {
        let sale = build_sale(&reference_cart(), "400", TaxRate::from_bps(1200), now(), [])
            .unwrap();

        assert_eq!(sale.id, now().timestamp_millis());
        assert_eq!(sale.date, now());
        assert_eq!(sale.subtotal_cents, 34500);
        assert_eq!(sale.tax_cents, 4140);
        assert_eq!(sale.grand_total().cents(), 38640);
        assert_eq!(sale.cash_cents, 40000);
        assert_eq!(sale.change_cents, 1360);

        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].name, "Big Mac");
        assert_eq!(sale.items[0].quantity, 2);
        assert_eq!(sale.items[1].name, "Fries (Small)");
        assert_eq!(sale.items[1].price_cents, 4500);
    }

    #[test]
    fn test_build_sale_insufficient_cash() {
        let err = build_sale(&reference_cart(), "300", TaxRate::from_bps(1200), now(), [])
            .unwrap_err();

        match err {
            CoreError::InsufficientCash { due, tendered } => {
                assert_eq!(due.cents(), 38640);
                assert_eq!(tendered.cents(), 30000);
            }
            other => panic!("expected InsufficientCash, got {other:?}"),
        }
    }

    #[test]
    fn test_build_sale_error_order() {
        let rate = TaxRate::from_bps(1200);
        assert!(matches!(
            build_sale(&Cart::new(), "", rate, now(), []),
            Err(CoreError::EmptyCart)
        ));
        assert!(matches!(
            build_sale(&Cart::new(), "1000", rate, now(), []),
            Err(CoreError::EmptyCart)
        ));
        assert!(matches!(
            build_sale(&reference_cart(), "four hundred", rate, now(), []),
            Err(CoreError::MissingCash)
        ));
    }

    #[test]
    fn test_build_sale_id_is_unique_within_same_millisecond() {
        let existing = [now().timestamp_millis()];
        let sale = build_sale(&reference_cart(), "400", TaxRate::from_bps(1200), now(), existing)
            .unwrap();
        assert_eq!(sale.id, now().timestamp_millis() + 1);
    }

    #[test]
    fn test_doubled_cart_doubles_whole_peso_totals() {
        let cart = reference_cart();
        let mut doubled = cart.clone();
        for line in &mut doubled.lines {
            line.quantity *= 2;
        }

        let rate = TaxRate::from_bps(1200);
        let single = build_sale(&cart, "1000", rate, now(), []).unwrap();
        let double = build_sale(&doubled, "1000", rate, now(), []).unwrap();

        assert_eq!(double.subtotal_cents, single.subtotal_cents * 2);
        assert_eq!(double.tax_cents, single.tax_cents * 2);
    }
}
