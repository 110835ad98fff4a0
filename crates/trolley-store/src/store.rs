//! # CartStore
//!
//! The session cart handle: three mutations, one read accessor.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operation Shape                            │
//! │                                                                         │
//! │  add_product / update_product_amount          remove_product           │
//! │       │                                            │                    │
//! │       ▼                                            │                    │
//! │  remote lookups (catalog + oracle)                 │ no lookups         │
//! │       │  (outside the lock, may suspend)           │                    │
//! │       ▼                                            ▼                    │
//! │  ┌───────────────── single-writer lock ─────────────────────────┐      │
//! │  │  1. pure next-state computation (trolley-core)               │      │
//! │  │  2. overwrite the snapshot slot (trolley-db)                 │      │
//! │  │  3. persist failed? roll the in-memory cart back             │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  any failure → CartNotifier, cart untouched, caller sees Ok-shaped ()  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why lookups happen outside the lock
//! Two rapid operations may interleave their lookup suspension points; that
//! is fine because each one recomputes its next state from the *latest*
//! cart under the lock. What the lock rules out is two computations based
//! on the same stale snapshot racing their writes.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::catalog::{ProductCatalog, StockOracle};
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::notify::{CartNotifier, TracingNotifier};
use crate::HttpCatalog;
use trolley_core::{Cart, CartError};
use trolley_db::{CartSnapshotRepository, Database, DbConfig};

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the session cart and exposes its mutation operations.
///
/// ## Contract
/// - Mutations either fully succeed (mutate + persist) or fully fail
///   (no partial mutation, no persistence)
/// - Failures never propagate to the caller; they reach the user through
///   the [`CartNotifier`] seam and are logged
/// - Reads go through [`CartStore::cart`]; there is no other way to see
///   or touch the state
///
/// Constructed explicitly and passed by handle to whichever components
/// need it. There is deliberately no global/ambient instance.
pub struct CartStore {
    /// The in-memory cart behind a single-writer lock.
    cart: Mutex<Cart>,

    /// Product metadata lookups.
    catalog: Arc<dyn ProductCatalog>,

    /// Stock availability lookups.
    oracle: Arc<dyn StockOracle>,

    /// Durable snapshot slot.
    snapshots: CartSnapshotRepository,

    /// User-facing notification sink.
    notifier: Arc<dyn CartNotifier>,

    /// Namespaced slot key the snapshot lives under.
    slot_key: String,
}

impl CartStore {
    /// Opens a cart store over an existing database.
    ///
    /// Hydrates the in-memory cart from the persisted snapshot; an empty
    /// slot means a fresh, empty cart. A present-but-corrupt snapshot is
    /// an error: silently discarding a customer's cart is worse than
    /// failing loudly at session start.
    pub async fn open(
        db: &Database,
        slot_key: impl Into<String>,
        catalog: Arc<dyn ProductCatalog>,
        oracle: Arc<dyn StockOracle>,
        notifier: Arc<dyn CartNotifier>,
    ) -> StoreResult<Self> {
        let slot_key = slot_key.into();
        let snapshots = db.carts();

        let cart = snapshots.load(&slot_key).await?.unwrap_or_default();
        debug!(slot_key = %slot_key, items = cart.item_count(), "Cart store opened");

        Ok(CartStore {
            cart: Mutex::new(cart),
            catalog,
            oracle,
            snapshots,
            notifier,
            slot_key,
        })
    }

    /// Opens a cart store from configuration: HTTP catalog client, SQLite
    /// snapshot database, tracing-backed notifier.
    pub async fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let http = HttpCatalog::new(client, config.api_base_url.clone());

        let db = Database::new(DbConfig::new(config.database_path.clone())).await?;

        CartStore::open(
            &db,
            config.slot_key.clone(),
            Arc::new(http.clone()),
            Arc::new(http),
            Arc::new(TracingNotifier),
        )
        .await
    }

    /// Returns a snapshot of the current cart.
    ///
    /// The returned value is a clone; holding it does not block mutations.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Adds one unit of a product to the cart.
    ///
    /// Looks up product metadata and current stock, then:
    /// - already in cart and below stock: increment by 1, persist
    /// - already in cart at the stock ceiling: reject (OutOfStock)
    /// - not in cart: append a new line item with amount 1, persist
    ///
    /// Lookup failures reject with "failed to add product".
    pub async fn add_product(&self, product_id: i64) {
        debug!(product_id, "add_product");

        let lookups = tokio::try_join!(self.catalog.get(product_id), self.oracle.get(product_id));
        let (product, stock) = match lookups {
            Ok(pair) => pair,
            Err(err) => {
                return self.reject(CartError::failed_add(err.to_string()));
            }
        };

        let mut cart = self.cart.lock().await;
        let previous = cart.clone();

        if let Err(err) = cart.add_unit(&product, &stock) {
            return self.reject(err);
        }

        if let Err(err) = self.snapshots.save(&self.slot_key, &cart).await {
            *cart = previous;
            return self.reject(CartError::failed_persist("add product", err.to_string()));
        }
    }

    /// Removes a product's line item from the cart.
    ///
    /// Performs no remote lookups. Rejects with "failed to remove product"
    /// when the product has no line item.
    pub async fn remove_product(&self, product_id: i64) {
        debug!(product_id, "remove_product");

        let mut cart = self.cart.lock().await;
        let previous = cart.clone();

        if let Err(err) = cart.remove(product_id) {
            return self.reject(err);
        }

        if let Err(err) = self.snapshots.save(&self.slot_key, &cart).await {
            *cart = previous;
            return self.reject(CartError::failed_persist("remove product", err.to_string()));
        }
    }

    /// Replaces a line item's amount, validated against current stock.
    ///
    /// Rejects when the amount is non-positive, exceeds available stock,
    /// or targets a product the cart does not hold. Lookup failures reject
    /// with "failed to update product quantity".
    pub async fn update_product_amount(&self, product_id: i64, amount: i64) {
        debug!(product_id, amount, "update_product_amount");

        let stock = match self.oracle.get(product_id).await {
            Ok(stock) => stock,
            Err(err) => {
                return self.reject(CartError::failed_update(err.to_string()));
            }
        };

        let mut cart = self.cart.lock().await;
        let previous = cart.clone();

        if let Err(err) = cart.set_amount(product_id, amount, &stock) {
            return self.reject(err);
        }

        if let Err(err) = self.snapshots.save(&self.slot_key, &cart).await {
            *cart = previous;
            return self.reject(CartError::failed_persist(
                "update product quantity",
                err.to_string(),
            ));
        }
    }

    /// Routes a rejected operation to the log and the notifier.
    fn reject(&self, error: CartError) {
        warn!(error = %error, "Cart operation rejected");
        self.notifier.notify(&error);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
