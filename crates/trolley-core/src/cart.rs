//! # Cart State Machine
//!
//! The cart and its three pure mutations.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations (pure)                                │
//! │                                                                         │
//! │  Storefront Action        CartStore (async)        Cart (this module)  │
//! │  ─────────────────        ─────────────────        ──────────────────  │
//! │                                                                         │
//! │  Click "Add" ────────────► add_product() ────────► add_unit()          │
//! │                             fetch product+stock      push / increment   │
//! │                                                                         │
//! │  Change quantity ────────► update_product_amount ─► set_amount()       │
//! │                             fetch stock              replace amount     │
//! │                                                                         │
//! │  Click "Remove" ─────────► remove_product() ──────► remove()           │
//! │                             no remote lookup         drop line item     │
//! │                                                                         │
//! │  Every Ok(_) from this module is followed by a snapshot persist.        │
//! │  Every Err(_) leaves the cart bit-for-bit unchanged.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::types::{Product, StockInfo};
use crate::MAX_ITEM_AMOUNT;

// =============================================================================
// Line Item
// =============================================================================

/// A line item in the cart.
///
/// ## Design Notes
/// - `product_id`: reference to the catalog product, unique within the cart
/// - metadata fields (`title`, `price_cents`, `image_url`): frozen copy of
///   the product at the time of adding, so the cart displays consistent
///   data even if the catalog changes afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Catalog product id.
    pub product_id: i64,

    /// Product title at time of adding (frozen).
    pub title: String,

    /// Price in cents at time of adding (frozen).
    pub price_cents: i64,

    /// Product image at time of adding (frozen).
    pub image_url: Option<String>,

    /// Quantity in cart, always >= 1.
    pub amount: i64,

    /// When this item was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line item from catalog metadata with amount = 1.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            product_id: product.id,
            title: product.title.clone(),
            price_cents: product.price_cents,
            image_url: product.image_url.clone(),
            amount: 1,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × amount).
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * self.amount
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of line items.
///
/// ## Invariants
/// - Items are unique by `product_id`
/// - Every `amount` is >= 1 and was <= observed stock at the last
///   successful mutation (best-effort; stock moves externally)
/// - Order is insertion order; lookups go by id, never by position
///
/// ## Serialized Shape
/// Serializes transparently as the line item array, which is exactly what
/// the persisted snapshot slot holds. The frontend binding is therefore
/// just `LineItem[]`; no separate TypeScript type is exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product, validated against a stock snapshot.
    ///
    /// ## Behavior
    /// - Product already in cart: increment its amount by 1 if that stays
    ///   within `stock.amount`, otherwise reject with [`CartError::OutOfStock`]
    /// - Product not in cart: append a new line item with amount = 1,
    ///   provided the oracle reports at least one unit available
    ///
    /// On rejection the cart is left untouched.
    pub fn add_unit(&mut self, product: &Product, stock: &StockInfo) -> CartResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let requested = item.amount + 1;
            if !stock.can_supply(requested) {
                return Err(CartError::OutOfStock {
                    product_id: product.id,
                    available: stock.amount,
                    requested,
                });
            }
            if requested > MAX_ITEM_AMOUNT {
                return Err(CartError::AmountTooLarge {
                    requested,
                    max: MAX_ITEM_AMOUNT,
                });
            }
            item.amount = requested;
            return Ok(());
        }

        // New line item: the oracle must have at least one unit, or the
        // persisted-amount <= observed-stock invariant would break on append.
        if !stock.can_supply(1) {
            return Err(CartError::OutOfStock {
                product_id: product.id,
                available: stock.amount,
                requested: 1,
            });
        }

        self.items.push(LineItem::from_product(product));
        Ok(())
    }

    /// Replaces the amount of an existing line item, validated against stock.
    ///
    /// ## Behavior
    /// - `amount <= 0` or `amount > stock.amount`: reject with
    ///   [`CartError::OutOfStock`]
    /// - Product not in cart: reject with [`CartError::ProductNotInCart`]
    ///   (the legacy storefront silently persisted an unchanged cart here;
    ///   this rejects instead, consistent with [`Cart::remove`])
    pub fn set_amount(&mut self, product_id: i64, amount: i64, stock: &StockInfo) -> CartResult<()> {
        if !stock.can_supply(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                available: stock.amount,
                requested: amount,
            });
        }
        if amount > MAX_ITEM_AMOUNT {
            return Err(CartError::AmountTooLarge {
                requested: amount,
                max: MAX_ITEM_AMOUNT,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.amount = amount;
                Ok(())
            }
            None => Err(CartError::ProductNotInCart { product_id }),
        }
    }

    /// Removes a line item by product id.
    ///
    /// Removes exactly the matching item and nothing else. Rejects with
    /// [`CartError::ProductNotInCart`] if no line item matches.
    pub fn remove(&mut self, product_id: i64) -> CartResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CartError::ProductNotInCart { product_id })
        } else {
            Ok(())
        }
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the amount of the given product, if present.
    pub fn amount_of(&self, product_id: i64) -> Option<i64> {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.amount)
    }

    /// Checks whether the cart holds a line item for the given product.
    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Returns the number of unique line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all line items.
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Calculates the cart subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price_cents: 999,
            image_url: None,
        }
    }

    fn stock(id: i64, amount: i64) -> StockInfo {
        StockInfo { id, amount }
    }

    #[test]
    fn test_add_distinct_products() {
        let mut cart = Cart::new();

        for id in 1..=3 {
            cart.add_unit(&test_product(id), &stock(id, 5)).unwrap();
        }

        assert_eq!(cart.item_count(), 3);
        for id in 1..=3 {
            assert_eq!(cart.amount_of(id), Some(1));
        }
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = Cart::new();
        let product = test_product(1);

        cart.add_unit(&product, &stock(1, 2)).unwrap();
        cart.add_unit(&product, &stock(1, 2)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.amount_of(1), Some(2));
    }

    #[test]
    fn test_add_at_stock_ceiling_rejected() {
        let mut cart = Cart::new();
        let product = test_product(1);

        cart.add_unit(&product, &stock(1, 1)).unwrap();
        let before = cart.clone();

        let err = cart.add_unit(&product, &stock(1, 1)).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: 1,
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_with_zero_stock_rejected() {
        let mut cart = Cart::new();

        let err = cart.add_unit(&test_product(1), &stock(1, 0)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { requested: 1, .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();

        cart.add_unit(&test_product(3), &stock(3, 5)).unwrap();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        // Incrementing must not move the item to the end.
        cart.add_unit(&test_product(3), &stock(3, 5)).unwrap();

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_line_item_freezes_metadata() {
        let mut cart = Cart::new();
        let mut product = test_product(1);
        cart.add_unit(&product, &stock(1, 5)).unwrap();

        // Catalog price change after adding must not affect the cart.
        product.price_cents = 1;
        assert_eq!(cart.items()[0].price_cents, 999);
    }

    #[test]
    fn test_set_amount_within_stock() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();

        cart.set_amount(1, 5, &stock(1, 5)).unwrap();
        assert_eq!(cart.amount_of(1), Some(5));
    }

    #[test]
    fn test_set_amount_zero_or_negative_rejected() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        let before = cart.clone();

        for amount in [0, -1, -99] {
            let err = cart.set_amount(1, amount, &stock(1, 5)).unwrap_err();
            assert!(matches!(err, CartError::OutOfStock { .. }));
        }
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_amount_above_stock_rejected() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();

        let err = cart.set_amount(1, 6, &stock(1, 5)).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: 1,
                available: 5,
                requested: 6,
            }
        );
        assert_eq!(cart.amount_of(1), Some(1));
    }

    #[test]
    fn test_set_amount_missing_product_rejected() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();

        let err = cart.set_amount(2, 1, &stock(2, 5)).unwrap_err();
        assert_eq!(err, CartError::ProductNotInCart { product_id: 2 });
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_set_amount_leaves_other_items_untouched() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        cart.add_unit(&test_product(2), &stock(2, 5)).unwrap();

        cart.set_amount(2, 4, &stock(2, 5)).unwrap();

        assert_eq!(cart.amount_of(1), Some(1));
        assert_eq!(cart.amount_of(2), Some(4));
    }

    #[test]
    fn test_remove_present_product() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        cart.add_unit(&test_product(2), &stock(2, 5)).unwrap();

        cart.remove(1).unwrap();

        assert!(!cart.contains(1));
        assert!(cart.contains(2));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_absent_product_rejected() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        let before = cart.clone();

        let err = cart.remove(99).unwrap_err();
        assert_eq!(err, CartError::ProductNotInCart { product_id: 99 });
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();
        cart.set_amount(1, 3, &stock(1, 5)).unwrap();
        cart.add_unit(&test_product(2), &stock(2, 5)).unwrap();

        assert_eq!(cart.total_amount(), 4);
        assert_eq!(cart.subtotal_cents(), 4 * 999);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut cart = Cart::new();
        cart.add_unit(&test_product(1), &stock(1, 5)).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_example_sequence() {
        // Empty cart, stock for product 1 is 5.
        let mut cart = Cart::new();
        let product = test_product(1);
        let s = stock(1, 5);

        cart.add_unit(&product, &s).unwrap();
        assert_eq!(cart.amount_of(1), Some(1));

        cart.add_unit(&product, &s).unwrap();
        assert_eq!(cart.amount_of(1), Some(2));

        cart.set_amount(1, 5, &s).unwrap();
        assert_eq!(cart.amount_of(1), Some(5));

        assert!(matches!(
            cart.set_amount(1, 6, &s),
            Err(CartError::OutOfStock { .. })
        ));
        assert_eq!(cart.amount_of(1), Some(5));

        cart.remove(1).unwrap();
        assert!(cart.is_empty());
    }
}
