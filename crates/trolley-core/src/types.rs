//! # Catalog Types
//!
//! Types mirroring what the remote catalog and stock oracle return.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │    StockInfo    │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (i64)       │        │  id (i64)       │                        │
//! │  │  title          │        │  amount (i64)   │                        │
//! │  │  price_cents    │        │                 │                        │
//! │  │  image_url      │        │  snapshot at    │                        │
//! │  │                 │        │  call time,     │                        │
//! │  │                 │        │  never cached   │                        │
//! │  └─────────────────┘        └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product ids are plain integers assigned by the upstream catalog; Trolley
//! never generates ids of its own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// Product metadata as served by the catalog API.
///
/// ## Price Representation
/// Prices are integer cents (smallest currency unit). Floating point money
/// is forbidden across the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog-assigned product identifier.
    pub id: i64,

    /// Display name shown in the cart drawer.
    pub title: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Product image, if the catalog provides one.
    pub image_url: Option<String>,
}

// =============================================================================
// Stock Info
// =============================================================================

/// Available quantity for a product, as reported by the stock oracle.
///
/// This is a snapshot at call time. Stock may change externally between
/// checks, so cart validation against it is best-effort by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInfo {
    /// Product identifier this stock record belongs to.
    pub id: i64,

    /// Units currently available for sale.
    pub amount: i64,
}

impl StockInfo {
    /// Checks whether `requested` units fit within available stock.
    #[inline]
    pub const fn can_supply(&self, requested: i64) -> bool {
        requested > 0 && requested <= self.amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_can_supply() {
        let stock = StockInfo { id: 1, amount: 5 };
        assert!(stock.can_supply(1));
        assert!(stock.can_supply(5));
        assert!(!stock.can_supply(6));
        assert!(!stock.can_supply(0));
        assert!(!stock.can_supply(-2));
    }

    #[test]
    fn test_product_json_shape() {
        // The catalog API serves exactly these field names.
        let json = r#"{"id":1,"title":"Sneaker","price_cents":17990,"image_url":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Sneaker");
        assert_eq!(product.price_cents, 17990);
        assert!(product.image_url.is_none());
    }
}
