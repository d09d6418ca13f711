//! # Vendure POS Register
//!
//! The application layer of the single-register point of sale. A UI shell
//! (desktop webview, terminal UI, kiosk) opens a [`Register`] and calls the
//! functions in [`commands`] for each user action.
//!
//! ## Module Structure
//! ```text
//! vendure_register/
//! ├── lib.rs           ◄─── You are here (Register, startup, logging)
//! ├── error.rs         ◄─── ApiError type
//! ├── state/
//! │   ├── mod.rs       ◄─── State exports
//! │   ├── db.rs        ◄─── StoreState (backend handle)
//! │   ├── cart.rs      ◄─── CartState (open cart)
//! │   ├── config.rs    ◄─── ConfigState (shop profile, tax, storage)
//! │   └── confirm.rs   ◄─── ConfirmState (pending destructive actions)
//! └── commands/
//!     ├── mod.rs       ◄─── Command exports
//!     ├── catalog.rs   ◄─── Product listing, catalog manager
//!     ├── cart.rs      ◄─── Cart operations
//!     ├── sale.rs      ◄─── Checkout, sales history
//!     ├── confirm.rs   ◄─── Confirm / cancel
//!     └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. ConfigState::from_env()                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Register::open(config)                                              │
//! │     ├── create the data directory                                       │
//! │     ├── connect the backend (SQLite / JSON files / memory)              │
//! │     ├── load the catalog (seeds the default menu on first run)          │
//! │     └── restore the persisted cart into memory                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. UI shell calls commands::* with register.store(), .cart(), ...      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vendure_store::{
    FileStore, KeyValueStore, MemoryStore, SqliteConfig, SqliteStore, Store, StoreBackend,
    StoreError,
};

pub use error::{ApiError, ErrorCode};
pub use state::{CartState, ConfigState, ConfirmState, StorageKind, StoreState};
pub use vendure_core::tender::{CashInput, KeypadKey};

/// SQLite database file inside the data directory.
pub const DATABASE_FILE_NAME: &str = "vendure.db";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=vendure=debug` - Show Vendure debug logs only
/// - Default: INFO level with vendure crates at DEBUG
///
/// Calling it more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vendure=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Platform data directory for the register.
///
/// ## Platform Paths
/// - Windows: `C:\Users\<user>\AppData\Roaming\vendure\pos\data`
/// - macOS: `~/Library/Application Support/ph.vendure.pos`
/// - Linux: `~/.local/share/pos`
///
/// Falls back to `./vendure-data` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("ph", "vendure", "pos")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./vendure-data"))
}

// =============================================================================
// Register
// =============================================================================

/// Everything the commands operate on.
#[derive(Debug)]
pub struct Register<S> {
    store: StoreState<S>,
    cart: CartState,
    config: ConfigState,
    confirmations: ConfirmState,
}

impl Register<StoreBackend> {
    /// Opens the backend named by `config.storage` under `config.data_dir`.
    pub async fn open(config: ConfigState) -> Result<Self, ApiError> {
        let backend = match config.storage {
            StorageKind::Memory => StoreBackend::Memory(MemoryStore::new()),
            StorageKind::File => {
                create_data_dir(&config).await?;
                StoreBackend::File(FileStore::new(&config.data_dir))
            }
            StorageKind::Sqlite => {
                create_data_dir(&config).await?;
                let path = config.data_dir.join(DATABASE_FILE_NAME);
                StoreBackend::Sqlite(SqliteStore::connect(SqliteConfig::new(path)).await?)
            }
        };

        info!(backend = backend.kind(), data_dir = %config.data_dir.display(), "Opening register");
        Self::with_store(Store::new(backend), config).await
    }
}

async fn create_data_dir(config: &ConfigState) -> Result<(), ApiError> {
    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .map_err(StoreError::from)?;
    Ok(())
}

impl<S: KeyValueStore> Register<S> {
    /// Builds a register over an already opened store.
    ///
    /// Seeds the catalog if missing and restores the persisted cart.
    pub async fn with_store(store: Store<S>, config: ConfigState) -> Result<Self, ApiError> {
        let products = store.catalog().load().await?;
        let cart = store.cart().load().await?;

        info!(
            products = products.len(),
            cart_lines = cart.line_count(),
            store_name = %config.store.name,
            "Register ready"
        );

        Ok(Register {
            store: StoreState::new(store),
            cart: CartState::restored(cart),
            config,
            confirmations: ConfirmState::new(),
        })
    }

    pub fn store(&self) -> &StoreState<S> {
        &self.store
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn confirmations(&self) -> &ConfirmState {
        &self.confirmations
    }
}
