//! # trolley-core: Pure Cart Logic for Trolley
//!
//! This crate is the **heart** of Trolley. It contains the cart state
//! machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (external)                       │   │
//! │  │    Product Grid ──► Cart Drawer ──► Toast Notifications        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trolley-store (CartStore)                        │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trolley-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐       ┌───────────┐       ┌───────────┐        │   │
//! │  │   │   types   │       │   cart    │       │   error   │        │   │
//! │  │   │  Product  │       │   Cart    │       │ CartError │        │   │
//! │  │   │ StockInfo │       │ LineItem  │       │           │        │   │
//! │  │   └───────────┘       └───────────┘       └───────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 trolley-db (Persistence Layer)                  │   │
//! │  │            SQLite snapshot slot, embedded migrations            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog-facing types (Product, StockInfo)
//! - [`cart`] - Cart and LineItem, plus the three pure mutations
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every mutation is deterministic given cart + stock
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **All-or-nothing**: A rejected mutation leaves the cart untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use trolley_core::{Cart, Product, StockInfo};
//!
//! let product = Product { id: 1, title: "Sneaker".into(), price_cents: 17990, image_url: None };
//! let stock = StockInfo { id: 1, amount: 5 };
//!
//! let mut cart = Cart::new();
//! cart.add_unit(&product, &stock).unwrap();
//! assert_eq!(cart.amount_of(1), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trolley_core::Cart` instead of
// `use trolley_core::cart::Cart`

pub use cart::{Cart, LineItem};
pub use error::{CartError, CartResult};
pub use types::{Product, StockInfo};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Namespaced storage key for the persisted cart snapshot.
///
/// ## Why a constant?
/// The cart is a single durable key-value slot, read once at session start
/// and overwritten wholesale on every successful mutation. The key is
/// namespaced so the slot can share a database with future snapshot kinds.
pub const CART_STORAGE_KEY: &str = "trolley:cart";

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Stock ceilings are usually far below this; it is a backstop, not a rule.
pub const MAX_ITEM_AMOUNT: i64 = 999;
