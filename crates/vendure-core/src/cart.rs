//! # Cart Engine
//!
//! The in-progress, not-yet-paid list of products for the current customer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Cart Method              Line Change          │
//! │  ───────────────          ───────────              ───────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_product() ────────► qty += 1 or push     │
//! │                                                                         │
//! │  Tap + / − ──────────────► change_quantity() ────► qty += delta         │
//! │                                                     (≤ 0 removes line)  │
//! │                                                     (> 9999 rejected)   │
//! │                                                                         │
//! │  Confirm "Clear cart?" ──► clear() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Totals panel ───────────► compute_totals() ─────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence after each mutation is the store's job; this module is pure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SaleItem, TaxRate};
use crate::validation::{validate_line_quantity, ValidationResult, MAX_LINE_QUANTITY};

/// A product in the cart with the quantity selected.
///
/// ## Design Notes
/// `name` and `price_cents` are frozen when the product is first added, so
/// editing or deleting the product in the catalog does not change an
/// in-progress sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: i64,
    /// Product name at time of adding (frozen)
    pub name: String,
    /// Price in centavos at time of adding (frozen)
    pub price_cents: i64,
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line with quantity 1 from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            price_cents: product.price_cents,
            quantity: 1,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Value copy used on the receipt.
    pub fn to_sale_item(&self) -> SaleItem {
        SaleItem {
            name: self.name.clone(),
            price_cents: self.price_cents,
            quantity: self.quantity,
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `product_id` (adding again increases quantity)
/// - Every line has quantity ≥ 1 (dropping to zero removes the line)
/// - No line exceeds [`MAX_LINE_QUANTITY`]
/// - Lines keep the order products were first added in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from stored lines, restoring the invariants above.
    ///
    /// Lines with a non-positive quantity are dropped, repeated product ids
    /// are merged into the first line for that product (keeping its
    /// snapshot), and quantities are clamped to the cap.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.line_mut(line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        for line in &mut cart.lines {
            line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
        }
        cart
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, snapshot kept as is
    /// - Product not in cart: new line appended with quantity 1
    /// - Line already at the quantity cap: `Err`, cart unchanged
    pub fn add_product(&mut self, product: &Product) -> ValidationResult<()> {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = validate_line_quantity(line.quantity.saturating_add(1))?,
            None => self.lines.push(CartLine::from_product(product)),
        }
        Ok(())
    }

    /// Adds `delta` to the quantity of the line for `product_id`.
    ///
    /// Removes the line when the quantity falls to zero or below. Returns
    /// `Ok(false)` (and changes nothing) when the product is not in the cart,
    /// and `Err` (again changing nothing) when the new quantity would pass
    /// the cap.
    pub fn change_quantity(&mut self, product_id: i64, delta: i64) -> ValidationResult<bool> {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return Ok(false);
        };

        let new_qty = self.lines[index].quantity.saturating_add(delta);
        if new_qty <= 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = validate_line_quantity(new_qty)?;
        }
        Ok(true)
    }

    /// Removes the line for a product regardless of quantity.
    pub fn remove_line(&mut self, product_id: i64) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ(price × quantity), before tax.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for the totals panel and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

/// Computes subtotal, tax and grand total.
///
/// Tax is taken once on the subtotal, not per line, so the figure matches
/// `round(subtotal × rate, 2)` on every receipt path.
pub fn compute_totals(cart: &Cart, rate: TaxRate) -> CartTotals {
    let subtotal = cart.subtotal();
    let tax = subtotal.calculate_tax(rate);

    CartTotals {
        item_count: cart.line_count(),
        total_quantity: cart.total_quantity(),
        subtotal,
        tax,
        grand_total: subtotal + tax,
    }
}

/// Computes change for the cash typed by the cashier.
///
/// ## Returns
/// - `Err(MissingCash)` when the input is empty, unparseable or negative
/// - `Ok(change)` otherwise; the change is negative while the cash is short
pub fn compute_change(grand_total: Money, cash_input: &str) -> CoreResult<Money> {
    let cash = Money::parse("cash", cash_input).map_err(|_| CoreError::MissingCash)?;
    Ok(cash - grand_total)
}

// =============================================================================
// Unit Tests
// =============================================================================
