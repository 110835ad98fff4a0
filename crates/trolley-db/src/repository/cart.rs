//! # Cart Snapshot Repository
//!
//! Database operations for the durable cart snapshot slot.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Slot                                        │
//! │                                                                         │
//! │  cart_snapshots                                                        │
//! │  ┌──────────────────┬─────────────────────────────┬──────────────┐     │
//! │  │ slot_key (PK)    │ payload (JSON array)        │ updated_at   │     │
//! │  ├──────────────────┼─────────────────────────────┼──────────────┤     │
//! │  │ "trolley:cart"   │ [{"productId":1,...}, ...]  │ 2026-08-30…  │     │
//! │  └──────────────────┴─────────────────────────────┴──────────────┘     │
//! │                                                                         │
//! │  • Read ONCE at session start                                          │
//! │  • Overwritten WHOLESALE after every successful mutation               │
//! │  • No partial/incremental format                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{DbError, DbResult};
use trolley_core::{Cart, MAX_ITEM_AMOUNT};

/// Repository for the cart snapshot slot.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.carts();
///
/// // Session start: hydrate, empty slot means empty cart upstream
/// let snapshot: Option<Cart> = repo.load("trolley:cart").await?;
///
/// // After every successful mutation
/// repo.save("trolley:cart", &cart).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CartSnapshotRepository {
    pool: SqlitePool,
}

impl CartSnapshotRepository {
    /// Creates a new CartSnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartSnapshotRepository { pool }
    }

    /// Loads the persisted cart for a slot key.
    ///
    /// ## Returns
    /// * `Ok(Some(Cart))` - A snapshot exists, parsed cleanly, and holds a
    ///   valid cart
    /// * `Ok(None)` - No snapshot has ever been written for this slot
    /// * `Err(DbError::InvalidPayload)` - Row exists but the JSON is bad or
    ///   the parsed cart violates an invariant
    pub async fn load(&self, slot_key: &str) -> DbResult<Option<Cart>> {
        debug!(slot_key = %slot_key, "Loading cart snapshot");

        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM cart_snapshots WHERE slot_key = ?1")
                .bind(slot_key)
                .fetch_optional(&self.pool)
                .await?;

        match payload {
            Some(json) => {
                let cart: Cart = serde_json::from_str(&json)?;
                check_invariants(&cart).map_err(DbError::InvalidPayload)?;
                debug!(items = cart.item_count(), "Snapshot hydrated");
                Ok(Some(cart))
            }
            None => Ok(None),
        }
    }

    /// Overwrites the slot with the full serialized cart.
    ///
    /// Upsert on the slot key: the previous snapshot is replaced wholesale,
    /// never merged.
    pub async fn save(&self, slot_key: &str, cart: &Cart) -> DbResult<()> {
        debug!(slot_key = %slot_key, items = cart.item_count(), "Saving cart snapshot");

        let payload = serde_json::to_string(cart)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (slot_key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(slot_key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts persisted slots (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_snapshots")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// A parseable payload is not automatically a valid cart. SQLite rows can be
// edited out-of-band, so hydration re-checks the invariants the mutations
// maintain: unique product ids and every amount in 1..=MAX_ITEM_AMOUNT.
fn check_invariants(cart: &Cart) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(cart.item_count());

    for item in cart.items() {
        if item.amount < 1 || item.amount > MAX_ITEM_AMOUNT {
            return Err(format!(
                "amount {} out of range for product {}",
                item.amount, item.product_id
            ));
        }
        if !seen.insert(item.product_id) {
            return Err(format!("duplicate line item for product {}", item.product_id));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use trolley_core::{Product, StockInfo, CART_STORAGE_KEY};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let stock = StockInfo { id: 1, amount: 5 };
        let product = Product {
            id: 1,
            title: "Sneaker".to_string(),
            price_cents: 17990,
            image_url: Some("https://cdn.example.com/sneaker.jpg".to_string()),
        };
        cart.add_unit(&product, &stock).unwrap();
        cart.set_amount(1, 3, &stock).unwrap();
        cart
    }

    #[tokio::test]
    async fn test_load_empty_slot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let snapshot = db.carts().load(CART_STORAGE_KEY).await.unwrap();
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();
        let cart = sample_cart();

        repo.save(CART_STORAGE_KEY, &cart).await.unwrap();
        let restored = repo.load(CART_STORAGE_KEY).await.unwrap().unwrap();

        // Same ids, amounts, and frozen metadata.
        assert_eq!(restored, cart);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();

        let mut cart = sample_cart();
        repo.save(CART_STORAGE_KEY, &cart).await.unwrap();

        cart.remove(1).unwrap();
        repo.save(CART_STORAGE_KEY, &cart).await.unwrap();

        let restored = repo.load(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert!(restored.is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();

        repo.save("trolley:cart", &sample_cart()).await.unwrap();
        repo.save("trolley:other", &Cart::new()).await.unwrap();

        let main = repo.load("trolley:cart").await.unwrap().unwrap();
        let other = repo.load("trolley:other").await.unwrap().unwrap();
        assert_eq!(main.item_count(), 1);
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_database_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trolley.db");
        let cart = sample_cart();

        {
            let db = Database::new(DbConfig::new(path.clone())).await.unwrap();
            db.carts().save(CART_STORAGE_KEY, &cart).await.unwrap();
            db.close().await;
        }

        // Fresh pool over the same file: the session-restart path.
        let db = Database::new(DbConfig::new(path)).await.unwrap();
        let restored = db.carts().load(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(restored, cart);
    }

    async fn seed_raw_payload(db: &Database, payload: &str) {
        sqlx::query("INSERT INTO cart_snapshots (slot_key, payload, updated_at) VALUES (?1, ?2, ?3)")
            .bind(CART_STORAGE_KEY)
            .bind(payload)
            .bind(Utc::now())
            .execute(db.pool())
            .await
            .unwrap();
    }

    fn line_item_json(product_id: i64, amount: i64) -> String {
        format!(
            r#"{{"productId":{},"title":"Sneaker","priceCents":17990,"imageUrl":null,"amount":{},"addedAt":"2026-08-30T12:00:00Z"}}"#,
            product_id, amount
        )
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_reported() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_raw_payload(&db, "{ not json").await;

        let err = db.carts().load(CART_STORAGE_KEY).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_tampered_amount_is_rejected() {
        // Well-formed JSON with an amount no mutation could have produced.
        for amount in [0, -3, MAX_ITEM_AMOUNT + 1] {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            seed_raw_payload(&db, &format!("[{}]", line_item_json(1, amount))).await;

            let err = db.carts().load(CART_STORAGE_KEY).await.unwrap_err();
            assert!(
                matches!(err, DbError::InvalidPayload(_)),
                "amount {} hydrated instead of being rejected",
                amount
            );
        }
    }

    #[tokio::test]
    async fn test_duplicate_line_item_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let payload = format!("[{},{}]", line_item_json(1, 2), line_item_json(1, 1));
        seed_raw_payload(&db, &payload).await;

        let err = db.carts().load(CART_STORAGE_KEY).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_valid_amounts_pass_the_invariant_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let payload = format!("[{},{}]", line_item_json(1, 1), line_item_json(2, MAX_ITEM_AMOUNT));
        seed_raw_payload(&db, &payload).await;

        let cart = db.carts().load(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(cart.amount_of(2), Some(MAX_ITEM_AMOUNT));
    }
}
