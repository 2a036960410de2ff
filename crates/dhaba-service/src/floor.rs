//! # Floor Session
//!
//! State for the tables screen: the in-memory floor plan plus the
//! persist-then-confirm sequencing for sending orders to the kitchen.
//!
//! ## Complete-Order Sequencing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  complete_order()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  floor.draft_order(now)      pure; rejects empty order                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.orders().insert(&draft)  durable write + kitchen broadcast         │
//! │       │                                                                 │
//! │       ├── Err ──► return error; TABLE STATE UNCHANGED, retry works     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  floor.confirm_order(id)     clear lines, reset flags, drop selection  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use dhaba_core::{FloorPlan, MenuItem, Money, Order, Table};
use dhaba_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Per-screen session for the dining floor.
#[derive(Debug)]
pub struct FloorSession {
    db: Database,
    floor: FloorPlan,
}

impl FloorSession {
    /// Creates the session with a fresh 25-table floor.
    pub fn new(db: Database) -> Self {
        FloorSession {
            db,
            floor: FloorPlan::new(),
        }
    }

    /// All tables with current occupancy flags.
    pub fn tables(&self) -> &[Table] {
        self.floor.tables()
    }

    /// The currently selected table, if any.
    pub fn selected_table(&self) -> Option<&Table> {
        self.floor.selected_table()
    }

    /// Selects a table for subsequent item operations.
    pub fn select_table(&mut self, id: &str) -> ServiceResult<()> {
        self.floor.select_table(id).map_err(ServiceError::from)
    }

    /// Drops the table selection.
    pub fn clear_selection(&mut self) {
        self.floor.clear_selection();
    }

    /// Adds one unit of a menu item to the selected table's order.
    pub fn add_item(&mut self, item: &MenuItem) -> ServiceResult<()> {
        self.floor.add_item(item).map_err(ServiceError::from)
    }

    /// Sets a line's quantity on the selected table; zero removes it.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> ServiceResult<()> {
        self.floor
            .update_quantity(item_id, quantity)
            .map_err(ServiceError::from)
    }

    /// Removes a line from the selected table's order.
    pub fn remove_item(&mut self, item_id: &str) -> ServiceResult<()> {
        self.floor.remove_item(item_id).map_err(ServiceError::from)
    }

    /// Running total for a table.
    pub fn order_total(&self, table_id: &str) -> Money {
        self.floor.order_total(table_id)
    }

    /// Sends the selected table's order to the kitchen.
    ///
    /// The table is cleared only after the insert succeeds; on failure the
    /// order stays on the table for a retry.
    pub async fn complete_order(&mut self) -> ServiceResult<Order> {
        let draft = self.floor.draft_order(Utc::now())?;

        self.db.orders().insert(&draft).await?;
        // Write is durable; releasing the table can no longer fail
        self.floor
            .confirm_order(&draft.table_id)
            .map_err(ServiceError::from)?;

        info!(
            order_number = %draft.order_number,
            table_id = %draft.table_id,
            total_paise = draft.total_paise,
            "Order sent to kitchen"
        );
        Ok(draft)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dhaba_core::OrderStatus;
    use dhaba_db::DbConfig;

    fn menu_item(id: &str, name: &str, price_paise: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price_paise,
            category: "Main Courses".to_string(),
        }
    }

    async fn session() -> FloorSession {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        FloorSession::new(db)
    }

    #[tokio::test]
    async fn test_complete_order_persists_and_clears_table() {
        let mut floor = session().await;

        floor.select_table("B3").unwrap();
        floor.add_item(&menu_item("m1", "Veg Thali", 21000)).unwrap();
        floor.add_item(&menu_item("m1", "Veg Thali", 21000)).unwrap();

        let order = floor.complete_order().await.unwrap();
        assert_eq!(order.table_id, "B3");
        assert_eq!(order.total_paise, 42000);
        assert_eq!(order.status, OrderStatus::Pending);

        // Table released
        let table = floor.tables().iter().find(|t| t.id == "B3").unwrap();
        assert!(!table.occupied);
        assert!(floor.selected_table().is_none());

        // And the order is in the store
        let pending = floor.db.orders().list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, order.id);
    }

    #[tokio::test]
    async fn test_complete_order_reaches_kitchen_subscribers() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut feed = db.subscribe_orders();
        let mut floor = FloorSession::new(db);

        floor.select_table("A1").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();
        let sent = floor.complete_order().await.unwrap();

        let received = feed.recv().await.unwrap();
        assert_eq!(received.id, sent.id);
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let mut floor = session().await;
        floor.select_table("A1").unwrap();

        let err = floor.complete_order().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_no_selection_is_rejected() {
        let mut floor = session().await;
        let err = floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }
}
