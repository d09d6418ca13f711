//! # Domain Types
//!
//! Core domain types used throughout Vendure POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (millis)    │   │  name (frozen)  │       │
//! │  │  name           │   │  date (UTC)     │   │  price (frozen) │       │
//! │  │  price_cents    │   │  items ─────────┼──►│  quantity       │       │
//! │  └─────────────────┘   │  subtotal, tax  │   └─────────────────┘       │
//! │                        │  cash, change   │                              │
//! │  ┌─────────────────┐   └─────────────────┘                              │
//! │  │    TaxRate      │                                                    │
//! │  │  1200 = 12%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `SaleItem` copies name and price out of the product at checkout. Editing
//! or deleting a product later never changes a historical receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1200 bps = 12% (Philippine VAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Label used on receipts, e.g. `12%` or `8.25%`.
    pub fn label(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}%", self.0 / 100)
        } else {
            let pct = format!("{:.2}", self.percentage());
            format!("{}%", pct.trim_end_matches('0'))
        }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Owned by the catalog; the cart and the ledger only ever hold copies of
/// its name and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (seed ids 1-20, later ids are creation millis).
    pub id: i64,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Price in centavos.
    pub price_cents: i64,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price_cents: price.cents(),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item on a receipt, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    /// Product name at time of sale.
    pub name: String,
    /// Unit price in centavos at time of sale.
    pub price_cents: i64,
    pub quantity: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed, paid transaction. Never mutated after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Creation timestamp in milliseconds (doubles as the receipt number).
    pub id: i64,
    /// When the sale was checked out.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    /// Pre-tax total.
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    /// Cash tendered.
    pub cash_cents: i64,
    pub change_cents: i64,
}

impl Sale {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Subtotal + tax.
    #[inline]
    pub fn grand_total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    #[inline]
    pub fn cash(&self) -> Money {
        Money::from_cents(self.cash_cents)
    }

    #[inline]
    pub fn change(&self) -> Money {
        Money::from_cents(self.change_cents)
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Generates a timestamp-derived id that is strictly greater than every id
/// in `existing`.
///
/// Two creations inside the same millisecond would otherwise collide.
pub fn next_timestamp_id(now: DateTime<Utc>, existing: impl IntoIterator<Item = i64>) -> i64 {
    let millis = now.timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= millis => max + 1,
        _ => millis,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1200);
        assert_eq!(rate.bps(), 1200);
        assert!((rate.percentage() - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(12.0).bps(), 1200);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_tax_rate_label() {
        assert_eq!(TaxRate::from_bps(1200).label(), "12%");
        assert_eq!(TaxRate::from_bps(825).label(), "8.25%");
        assert_eq!(TaxRate::from_bps(750).label(), "7.5%");
    }

    #[test]
    fn test_sale_grand_total() {
        let sale = Sale {
            id: 1,
            date: Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap(),
            items: vec![SaleItem {
                name: "Big Mac".to_string(),
                price_cents: 15000,
                quantity: 2,
            }],
            subtotal_cents: 30000,
            tax_cents: 3600,
            cash_cents: 40000,
            change_cents: 6400,
        };
        assert_eq!(sale.grand_total().cents(), 33600);
        assert_eq!(sale.items[0].line_total().cents(), 30000);
    }

    #[test]
    fn test_sale_json_shape() {
        let sale = Sale {
            id: 1760688000000,
            date: Utc.with_ymd_and_hms(2025, 10, 17, 8, 0, 0).unwrap(),
            items: vec![],
            subtotal_cents: 0,
            tax_cents: 0,
            cash_cents: 0,
            change_cents: 0,
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["date"], "2025-10-17T08:00:00Z");
        assert_eq!(json["id"], 1760688000000_i64);
    }

    #[test]
    fn test_next_timestamp_id() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(next_timestamp_id(now, []), 1_000);
        assert_eq!(next_timestamp_id(now, [1, 20]), 1_000);
        assert_eq!(next_timestamp_id(now, [1_000]), 1_001);
        assert_eq!(next_timestamp_id(now, [5_000, 3]), 5_001);
    }
}
