//! # Order Repository
//!
//! Database operations for kitchen orders, plus the insert feed that keeps
//! kitchen screens live.
//!
//! ## Push Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Waiter confirms order                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert(&order)                                                         │
//! │       ├── 1. INSERT INTO orders ...   (durable write FIRST)            │
//! │       └── 2. broadcast to subscribers (best effort, after commit)      │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Kitchen screens: initial list_pending() fetch, then live receives.    │
//! │  A screen that lags past the channel capacity misses old entries and   │
//! │  refetches; the row is already in the table either way.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dhaba_core::{BillLine, Order, OrderStatus};

/// Repository for kitchen order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
    feed: broadcast::Sender<Order>,
}

impl OrderRepository {
    /// Creates a new OrderRepository publishing inserts to `feed`.
    pub fn new(pool: SqlitePool, feed: broadcast::Sender<Order>) -> Self {
        OrderRepository { pool, feed }
    }

    /// Inserts a kitchen order and notifies subscribers.
    ///
    /// The broadcast happens only after the row is committed, and a send
    /// with zero subscribers is not an error: the kitchen screen may simply
    /// not be open.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            order_number = %order.order_number,
            table_id = %order.table_id,
            "Inserting kitchen order"
        );

        let items = serde_json::to_string(&order.items)?;
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, table_block, table_number, table_id,
                items, total_paise, order_number, created_at, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.table_block)
        .bind(order.table_number as i64)
        .bind(&order.table_id)
        .bind(items)
        .bind(order.total_paise)
        .bind(&order.order_number)
        .bind(order.created_at)
        .bind(order.status.as_str())
        .execute(&self.pool)
        .await?;

        let _ = self.feed.send(order.clone());
        Ok(())
    }

    /// Lists orders still waiting in the kitchen, oldest first (the order
    /// they should be cooked in).
    pub async fn list_pending(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, table_block, table_number, table_id,
                   items, total_paise, order_number, created_at, status
            FROM orders
            WHERE status = 'pending'
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect()
    }

    /// Lists all orders, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, table_block, table_number, table_id,
                   items, total_paise, order_number, created_at, status
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect()
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, table_block, table_number, table_id,
                   items, total_paise, order_number, created_at, status
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_order).transpose()
    }

    /// Sets an order's status (pending → completed when the kitchen marks
    /// it done).
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }
        Ok(())
    }

    /// Deletes an order (admin cleanup; completed orders are normally kept).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }
        Ok(())
    }
}

fn row_to_order(row: &sqlx::sqlite::SqliteRow) -> DbResult<Order> {
    let items_json: String = row.try_get("items")?;
    let items: Vec<BillLine> = serde_json::from_str(&items_json)?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    let status_raw: String = row.try_get("status")?;
    let status = OrderStatus::parse(&status_raw)
        .ok_or_else(|| DbError::Internal(format!("unknown order status: {status_raw}")))?;

    let table_number: i64 = row.try_get("table_number")?;

    Ok(Order {
        id: row.try_get("id")?,
        table_block: row.try_get("table_block")?,
        table_number: table_number as u8,
        table_id: row.try_get("table_id")?,
        items,
        total_paise: row.try_get("total_paise")?,
        order_number: row.try_get("order_number")?,
        created_at,
        status,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
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
    async fn test_insert_and_roundtrip() {
        let db = test_db().await;
        let repo = db.orders();

        let original = order("B3", "2025-05-02T10:00:00Z");
        repo.insert(&original).await.unwrap();

        let stored = repo.get_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_insert_notifies_subscribers() {
        let db = test_db().await;
        let mut feed = db.subscribe_orders();

        let sent = order("A1", "2025-05-02T10:00:00Z");
        db.orders().insert(&sent).await.unwrap();

        let received = feed.recv().await.unwrap();
        assert_eq!(received.id, sent.id);
        assert_eq!(received.table_id, "A1");
    }

    #[tokio::test]
    async fn test_insert_without_subscribers_is_fine() {
        let db = test_db().await;

        // No subscriber exists; the write must still succeed
        db.orders()
            .insert(&order("C2", "2025-05-02T10:00:00Z"))
            .await
            .unwrap();

        assert_eq!(db.orders().list_pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pending_excludes_completed_and_is_oldest_first() {
        let db = test_db().await;
        let repo = db.orders();

        let late = order("A1", "2025-05-02T12:00:00Z");
        let early = order("B2", "2025-05-02T10:00:00Z");
        let done = order("C3", "2025-05-02T11:00:00Z");

        repo.insert(&late).await.unwrap();
        repo.insert(&early).await.unwrap();
        repo.insert(&done).await.unwrap();
        repo.set_status(&done.id, OrderStatus::Completed)
            .await
            .unwrap();

        let pending = repo.list_pending().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].table_id, "B2");
        assert_eq!(pending[1].table_id, "A1");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.orders();

        let ticket = order("D4", "2025-05-02T10:00:00Z");
        repo.insert(&ticket).await.unwrap();
        repo.delete(&ticket.id).await.unwrap();

        assert!(repo.get_by_id(&ticket.id).await.unwrap().is_none());

        let err = repo.delete(&ticket.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_status_missing_order() {
        let db = test_db().await;
        let err = db
            .orders()
            .set_status("no-such-id", OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
