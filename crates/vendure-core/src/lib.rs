//! # vendure-core: Pure Business Logic for Vendure POS
//!
//! Everything the register computes lives here as plain functions over plain
//! data. Nothing in this crate touches storage, files or the clock; callers
//! pass `now` in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vendure POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI shell (three views)                       │   │
//! │  │       POS / checkout ──► Sales history ──► Catalog manager     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vendure-register commands                      │   │
//! │  │     add_to_cart, checkout, list_sales, export_sales_csv, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ vendure-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌──────────┐ ┌────────┐ ┌──────────┐   │   │
//! │  │  │ money  │ │  cart  │ │ checkout │ │ ledger │ │ receipt  │   │   │
//! │  │  │ types  │ │ totals │ │build_sale│ │ ranges │ │ export   │   │   │
//! │  │  └────────┘ └────────┘ └──────────┘ └────────┘ └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │          NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vendure-store (persistence)                     │   │
//! │  │          catalog / cart / sales documents in a KV store         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Sale, SaleItem, TaxRate, id generation
//! - [`money`] - Integer centavo arithmetic and amount parsing
//! - [`cart`] - Cart engine and totals
//! - [`checkout`] - Sale building with checkout validation
//! - [`ledger`] - Date ranges and presets over the sales ledger
//! - [`receipt`] - Receipt view, text and HTML rendering
//! - [`export`] - CSV export
//! - [`tender`] - Cash keypad buffer
//! - [`validation`] - Catalog input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vendure_core::cart::{compute_totals, Cart};
//! use vendure_core::{Money, Product, DEFAULT_TAX_RATE};
//!
//! let mut cart = Cart::new();
//! let big_mac = Product::new(1, "Big Mac", Money::from_cents(15000));
//! cart.add_product(&big_mac).unwrap();
//! cart.add_product(&big_mac).unwrap();
//! cart.add_product(&Product::new(6, "Fries (Small)", Money::from_cents(4500))).unwrap();
//!
//! let totals = compute_totals(&cart, DEFAULT_TAX_RATE);
//! assert_eq!(totals.subtotal.cents(), 34500);
//! assert_eq!(totals.tax.cents(), 4140);
//! assert_eq!(totals.grand_total.cents(), 38640);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod export;
pub mod ledger;
pub mod money;
pub mod receipt;
pub mod tender;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{DateRange, RangePreset};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLayout, StoreProfile};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Philippine VAT, 12%.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1200);

/// Currency symbol used when none is configured.
pub const CURRENCY_SYMBOL: &str = "₱";
