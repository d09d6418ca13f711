//! # Commands Module
//!
//! One function per UI action. A UI shell (desktop webview, TUI, HTTP
//! adapter) calls these and serializes the result or the [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Product listing and catalog manager CRUD
//! ├── cart.rs     ◄─── Cart manipulation and change preview
//! ├── sale.rs     ◄─── Checkout, sales history, CSV, receipts
//! ├── confirm.rs  ◄─── Confirm / cancel destructive actions
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POS view          list_products, get_cart, add_to_cart,                │
//! │                    change_quantity, preview_change,                     │
//! │                    request_clear_cart, checkout                         │
//! │                                                                         │
//! │  Sales history     list_sales, parse_range, range_for_preset,           │
//! │                    export_sales_csv, render_receipt_text,               │
//! │                    render_receipt_html, request_delete_sale             │
//! │                                                                         │
//! │  Catalog manager   list_products, add_product, update_product,          │
//! │                    request_delete_product                               │
//! │                                                                         │
//! │  Shared            get_config, confirm, cancel                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! list_products(register.store()).await?;
//!
//! // Only needs cart + config
//! get_cart(register.cart(), register.config());
//!
//! // Needs store, cart and config
//! checkout(register.store(), register.cart(), register.config(), "400").await?;
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod confirm;
pub mod sale;
