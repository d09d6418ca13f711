//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VENDURE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;
use vendure_core::receipt::DEFAULT_RECEIPT_WIDTH;
use vendure_core::{Money, ReceiptLayout, StoreProfile, TaxRate, CURRENCY_SYMBOL, DEFAULT_TAX_RATE};

/// Which backend holds the catalog, cart and ledger documents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// `vendure.db` in the data directory
    #[default]
    Sqlite,

    /// One JSON file per document in the data directory
    File,

    /// Nothing survives a restart (demos and tests)
    Memory,
}

impl StorageKind {
    /// Parses `sqlite`, `file` or `memory`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(StorageKind::Sqlite),
            "file" => Some(StorageKind::File),
            "memory" => Some(StorageKind::Memory),
            _ => None,
        }
    }
}

/// Register configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop details printed on receipts
    pub store: StoreProfile,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Tax rate in basis points
    /// e.g., 1200 = 12%
    pub tax_rate_bps: u32,

    /// Text receipt width in characters
    pub receipt_width: usize,

    pub storage: StorageKind,

    /// Where the SQLite database or JSON documents live
    pub data_dir: PathBuf,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Vendure Mart"
    /// - Currency: PHP (₱)
    /// - Tax: 12% VAT
    /// - Storage: SQLite in the platform data directory
    fn default() -> Self {
        ConfigState {
            store: StoreProfile::default(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE.bps(),
            receipt_width: DEFAULT_RECEIPT_WIDTH,
            storage: StorageKind::default(),
            data_dir: crate::default_data_dir(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VENDURE_STORE_NAME`: Override store name
    /// - `VENDURE_TAX_RATE`: Override tax rate in percent (e.g., "12")
    /// - `VENDURE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `VENDURE_DATA_DIR`: Override data directory
    /// - `VENDURE_STORAGE`: `sqlite`, `file` or `memory`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("VENDURE_STORE_NAME") {
            let name = name.trim();
            if name.is_empty() {
                warn!("Ignoring empty VENDURE_STORE_NAME");
            } else {
                config.store.name = name.to_string();
            }
        }

        if let Some(rate) = lookup("VENDURE_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && (0.0..=100.0).contains(&pct) => {
                    config.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %rate, "Ignoring invalid VENDURE_TAX_RATE"),
            }
        }

        if let Some(symbol) = lookup("VENDURE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(dir) = lookup("VENDURE_DATA_DIR") {
            if dir.trim().is_empty() {
                warn!("Ignoring empty VENDURE_DATA_DIR");
            } else {
                config.data_dir = PathBuf::from(dir.trim());
            }
        }

        if let Some(storage) = lookup("VENDURE_STORAGE") {
            match StorageKind::parse(&storage) {
                Some(kind) => config.storage = kind,
                None => warn!(value = %storage, "Ignoring unknown VENDURE_STORAGE"),
            }
        }

        config
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Everything the receipt renderers need from the configuration.
    pub fn receipt_layout(&self) -> ReceiptLayout {
        ReceiptLayout {
            profile: self.store.clone(),
            currency_symbol: self.currency_symbol.clone(),
            tax_rate: self.tax_rate(),
            width: self.receipt_width,
        }
    }

    /// Formats a centavo amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "₱12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        Money::from_cents(cents).format_with(&self.currency_symbol)
    }
}
