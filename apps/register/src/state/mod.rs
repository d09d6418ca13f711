//! # State Module
//!
//! Manages register state.
//!
//! Each concern gets its own state type so a command declares exactly what
//! it touches, and independent states don't block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Register<S>                                │   │
//! │  │  Register::open(config) / Register::with_store(store, config)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌──────────────┬───────┴──────┬──────────────────┐              │
//! │       ▼              ▼              ▼                  ▼               │
//! │  ┌───────────┐ ┌───────────┐ ┌──────────────┐ ┌────────────────┐      │
//! │  │StoreState │ │ CartState │ │ ConfigState  │ │ ConfirmState   │      │
//! │  │           │ │           │ │              │ │                │      │
//! │  │ Store<S>  │ │ Arc<Mutex<│ │ shop profile │ │ Mutex<HashMap< │      │
//! │  │ (catalog, │ │   Cart    │ │ tax rate     │ │  Uuid,         │      │
//! │  │ cart,     │ │ >>        │ │ storage      │ │  PendingAction │      │
//! │  │ sales)    │ │           │ │              │ │ >>             │      │
//! │  └───────────┘ └───────────┘ └──────────────┘ └────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: backends synchronize internally                         │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • ConfirmState: Mutex-guarded token map, tokens are single-use        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod confirm;
mod db;

pub use cart::CartState;
pub use config::{ConfigState, StorageKind};
pub use confirm::{ConfirmState, ConfirmationRequest, PendingAction};
pub use db::StoreState;
