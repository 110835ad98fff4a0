//! # Repository Module
//!
//! Repository implementations for persistence operations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CartStore (trolley-store)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.carts() ──────► CartSnapshotRepository                             │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                     SqlitePool ──► cart_snapshots table                │
//! │                                                                         │
//! │  Repositories own SQL; callers own semantics.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

pub use cart::CartSnapshotRepository;
