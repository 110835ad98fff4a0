//! # trolley-store: CartStore Orchestration for Trolley
//!
//! This crate wires the pure cart state machine to its external
//! collaborators: the remote catalog/stock API, the snapshot database, and
//! the user notification channel.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Orchestration                            │
//! │                                                                         │
//! │  Storefront UI                                                         │
//! │       │ holds a CartStore handle (no ambient/global state)             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   trolley-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   CartStore ──► ProductCatalog / StockOracle (HTTP, reqwest)   │   │
//! │  │       │     ──► CartNotifier (toast seam)                      │   │
//! │  │       │     ──► CartSnapshotRepository (trolley-db)            │   │
//! │  │       └─────► Cart (trolley-core, pure)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The CartStore handle and its three operations
//! - [`catalog`] - Lookup traits and the HTTP implementation
//! - [`notify`] - Notification seam
//! - [`config`] - StoreConfig (TOML + env overrides)
//! - [`error`] - Construction-time errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trolley_store::{CartStore, StoreConfig};
//!
//! let config = StoreConfig::load(None)?;
//! let store = CartStore::from_config(&config).await?;
//!
//! store.add_product(42).await;
//! store.update_product_amount(42, 3).await;
//! let cart = store.cart().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogError, HttpCatalog, ProductCatalog, StockOracle};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use notify::{CartNotifier, NoOpNotifier, TracingNotifier};
pub use store::CartStore;

// Re-export the domain types callers interact with
pub use trolley_core::{Cart, CartError, LineItem, Product, StockInfo};
