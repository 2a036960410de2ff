//! # Kitchen Feed
//!
//! State for the kitchen display: the pending-order list, kept live from
//! the database broadcast feed.
//!
//! ## Feed Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kitchen screen opens                                                   │
//! │       │                                                                 │
//! │       ├── 1. subscribe to the order feed  (BEFORE the fetch, so        │
//! │       │      nothing slips between the two)                            │
//! │       ├── 2. load() initial list_pending() fetch                       │
//! │       └── 3. handle_push() for each received order                     │
//! │                                                                         │
//! │  An order can arrive BOTH via the fetch and via the feed. The list     │
//! │  de-duplicates by order id, so the overlap is harmless.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use dhaba_core::{Order, OrderStatus};
use dhaba_db::Database;

use crate::error::ServiceResult;

/// Per-screen session for the kitchen display.
#[derive(Debug)]
pub struct KitchenFeed {
    db: Database,
    /// Pending orders, oldest first (cook order). Unique by order id.
    orders: Vec<Order>,
}

impl KitchenFeed {
    /// Creates an empty feed. Call [`load`](Self::load) after subscribing
    /// to the database order feed.
    pub fn new(db: Database) -> Self {
        KitchenFeed {
            db,
            orders: Vec::new(),
        }
    }

    /// Pending orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Initial fetch of everything still pending in the store.
    ///
    /// Merges with (rather than replaces) orders already pushed, so the
    /// subscribe-then-fetch startup sequence never drops one.
    pub async fn load(&mut self) -> ServiceResult<()> {
        let pending = self.db.orders().list_pending().await?;
        info!(count = pending.len(), "Kitchen feed loaded");

        for order in pending {
            self.insert_unique(order);
        }
        self.orders.sort_by_key(|o| o.created_at);
        Ok(())
    }

    /// Applies one order received from the broadcast feed.
    ///
    /// Duplicates (already fetched, or redelivered) are ignored by id.
    pub fn handle_push(&mut self, order: Order) {
        if self.insert_unique(order) {
            self.orders.sort_by_key(|o| o.created_at);
        }
    }

    /// Marks an order completed: persisted first, then removed from the
    /// screen. A failed write leaves the ticket visible.
    pub async fn complete(&mut self, order_id: &str) -> ServiceResult<()> {
        self.db
            .orders()
            .set_status(order_id, OrderStatus::Completed)
            .await?;

        self.orders.retain(|o| o.id != order_id);
        info!(id = %order_id, "Order completed");
        Ok(())
    }

    /// Inserts unless an order with the same id is already listed.
    fn insert_unique(&mut self, order: Order) -> bool {
        if self.orders.iter().any(|o| o.id == order.id) {
            debug!(id = %order.id, "Duplicate order push ignored");
            return false;
        }
        self.orders.push(order);
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dhaba_core::BillLine;
    use dhaba_db::DbConfig;
    use uuid::Uuid;

    fn order(table_id: &str, created_at: &str) -> Order {
        Order {
            id: Uuid::new_v4().to_string(),
            table_block: table_id[..1].to_string(),
            table_number: table_id[1..].parse().unwrap(),
            table_id: table_id.to_string(),
            items: vec![BillLine {
                item_id: "m1".to_string(),
                name: "Veg Thali".to_string(),
                price_paise: 21000,
                quantity: 1,
            }],
            total_paise: 21000,
            order_number: "ORD-000123".to_string(),
            created_at: created_at.parse().unwrap(),
            status: OrderStatus::Pending,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_then_push_deduplicates() {
        let db = test_db().await;
        let stored = order("B3", "2025-05-02T10:00:00Z");
        db.orders().insert(&stored).await.unwrap();

        let mut kitchen = KitchenFeed::new(db);
        kitchen.load().await.unwrap();
        assert_eq!(kitchen.orders().len(), 1);

        // The same order arriving over the feed must not duplicate
        kitchen.handle_push(stored.clone());
        assert_eq!(kitchen.orders().len(), 1);

        // A different order is appended
        kitchen.handle_push(order("C1", "2025-05-02T11:00:00Z"));
        assert_eq!(kitchen.orders().len(), 2);
    }

    #[tokio::test]
    async fn test_orders_stay_oldest_first() {
        let db = test_db().await;
        let mut kitchen = KitchenFeed::new(db);

        kitchen.handle_push(order("A1", "2025-05-02T12:00:00Z"));
        kitchen.handle_push(order("B2", "2025-05-02T10:00:00Z"));

        let tables: Vec<&str> = kitchen.orders().iter().map(|o| o.table_id.as_str()).collect();
        assert_eq!(tables, vec!["B2", "A1"]);
    }

    #[tokio::test]
    async fn test_complete_persists_and_removes() {
        let db = test_db().await;
        let ticket = order("B3", "2025-05-02T10:00:00Z");
        db.orders().insert(&ticket).await.unwrap();

        let mut kitchen = KitchenFeed::new(db.clone());
        kitchen.load().await.unwrap();

        kitchen.complete(&ticket.id).await.unwrap();
        assert!(kitchen.orders().is_empty());

        let stored = db.orders().get_by_id(&ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_complete_unknown_order_keeps_list() {
        let db = test_db().await;
        let mut kitchen = KitchenFeed::new(db);
        kitchen.handle_push(order("A1", "2025-05-02T10:00:00Z"));

        let err = kitchen.complete("no-such-id").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(kitchen.orders().len(), 1);
    }
}
