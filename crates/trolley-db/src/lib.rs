//! # trolley-db: Persistence Layer for Trolley
//!
//! This crate provides durable storage for the cart snapshot.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Data Flow                                │
//! │                                                                         │
//! │  CartStore mutation (add_product / remove_product / update amount)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     trolley-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐   ┌───────────┐  │   │
//! │  │   │   Database    │    │ CartSnapshotRepo   │   │ Migrations│  │   │
//! │  │   │   (pool.rs)   │◄───│ (repository/cart)  │   │ (embedded)│  │   │
//! │  │   └───────────────┘    └────────────────────┘   └───────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file: one snapshot slot, JSON payload, overwritten wholesale   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trolley_db::{Database, DbConfig};
//! use trolley_core::CART_STORAGE_KEY;
//!
//! let db = Database::new(DbConfig::new("path/to/trolley.db")).await?;
//!
//! // Session start
//! let cart = db.carts().load(CART_STORAGE_KEY).await?.unwrap_or_default();
//!
//! // After a successful mutation
//! db.carts().save(CART_STORAGE_KEY, &cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use repository::cart::CartSnapshotRepository;
