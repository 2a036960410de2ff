//! # Floor Plan Tracker
//!
//! In-memory state of the 25-table dining floor and the per-table orders
//! being built on it.
//!
//! ## Floor Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Block A    Block B    Block C    Block D    Block E                   │
//! │   A1..A5     B1..B5     C1..C5     D1..D5     E1..E5                    │
//! │                                                                         │
//! │   Fixed set, generated at startup, never persisted. Selecting a table  │
//! │   marks it occupied; afterwards the flags follow whether the table     │
//! │   still has order lines.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two-Phase Completion
//! Sending an order to the kitchen is split so the table is only cleared
//! after the store accepted the write:
//!
//! 1. [`FloorPlan::draft_order`] - pure; validates and builds the `Order`
//!    record without touching floor state.
//! 2. caller persists the draft (fallible, outside this crate)
//! 3. [`FloorPlan::confirm_order`] - clears the table's lines and flags.
//!
//! If persistence fails the caller simply never confirms, and the table
//! keeps its order for a retry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::numbering::order_number_at;
use crate::types::{lines_total, BillLine, MenuItem, Order, OrderStatus, Table, TableBlock};
use crate::TABLES_PER_BLOCK;

/// Generates the fixed floor: blocks A through E, five tables each, all
/// free. Order is block-major (A1..A5, B1..B5, ...).
pub fn generate_tables() -> Vec<Table> {
    TableBlock::ALL
        .iter()
        .flat_map(|&block| (1..=TABLES_PER_BLOCK).map(move |n| Table::new(block, n)))
        .collect()
}

// =============================================================================
// Floor Plan
// =============================================================================

/// Mutable floor state: the table set, the waiter's current selection, and
/// the in-progress order lines per table.
///
/// Purely in-memory; an app restart loses unsent orders by design (they
/// were never confirmed to the kitchen).
#[derive(Debug, Clone)]
pub struct FloorPlan {
    tables: Vec<Table>,
    selected: Option<String>,
    orders: HashMap<String, Vec<BillLine>>,
}

impl FloorPlan {
    /// A fresh floor: 25 free tables, nothing selected, no orders.
    pub fn new() -> Self {
        FloorPlan {
            tables: generate_tables(),
            selected: None,
            orders: HashMap::new(),
        }
    }

    /// All tables in floor order, with current flags.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The currently selected table, if any.
    pub fn selected_table(&self) -> Option<&Table> {
        let id = self.selected.as_deref()?;
        self.table(id)
    }

    fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    fn table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// Selects a table as the target for subsequent item operations and
    /// marks it occupied.
    ///
    /// Moving the selection away from a table that never got any lines
    /// releases it again.
    pub fn select_table(&mut self, id: &str) -> CoreResult<()> {
        if self.table(id).is_none() {
            return Err(CoreError::UnknownTable(id.to_string()));
        }

        if let Some(previous) = self.selected.take() {
            self.sync_flags(&previous);
        }

        self.selected = Some(id.to_string());
        if let Some(table) = self.table_mut(id) {
            table.occupied = true;
            table.order_in_progress = true;
        }
        Ok(())
    }

    /// Drops the selection without touching the table's order. A table left
    /// without lines is released.
    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selected.take() {
            self.sync_flags(&previous);
        }
    }

    /// Order lines currently on a table (empty slice if none).
    pub fn order_lines(&self, table_id: &str) -> &[BillLine] {
        self.orders.get(table_id).map_or(&[], Vec::as_slice)
    }

    /// Running total of a table's order.
    pub fn order_total(&self, table_id: &str) -> Money {
        lines_total(self.order_lines(table_id))
    }

    /// Adds one unit of a menu item to the selected table's order.
    ///
    /// Merges by menu-item id: a second add of the same item bumps the
    /// existing line's quantity instead of creating a duplicate line. The
    /// line snapshots the item's name and price at first add.
    pub fn add_item(&mut self, item: &MenuItem) -> CoreResult<()> {
        let table_id = self.selected.clone().ok_or(CoreError::NoTableSelected)?;

        let lines = self.orders.entry(table_id.clone()).or_default();
        match lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => lines.push(BillLine::from_menu_item(item)),
        }

        self.sync_flags(&table_id);
        Ok(())
    }

    /// Sets a line's quantity on the selected table. A quantity of zero or
    /// less removes the line.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        let table_id = self.selected.clone().ok_or(CoreError::NoTableSelected)?;

        let lines = self
            .orders
            .get_mut(&table_id)
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        let pos = lines
            .iter()
            .position(|l| l.item_id == item_id)
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        if quantity <= 0 {
            lines.remove(pos);
        } else {
            lines[pos].quantity = quantity;
        }

        self.sync_flags(&table_id);
        Ok(())
    }

    /// Removes a line from the selected table's order.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        self.update_quantity(item_id, 0)
    }

    /// Builds the kitchen-order record for the selected table WITHOUT
    /// changing floor state.
    ///
    /// Pure with respect to the floor: call it, persist the result, then
    /// [`confirm_order`](FloorPlan::confirm_order) on success. Rejects an
    /// empty order.
    pub fn draft_order(&self, at: DateTime<Utc>) -> CoreResult<Order> {
        let table = self.selected_table().ok_or(CoreError::NoTableSelected)?;

        let lines = self.order_lines(&table.id);
        if lines.is_empty() {
            return Err(CoreError::EmptyOrder {
                table_id: table.id.clone(),
            });
        }

        Ok(Order {
            id: Uuid::new_v4().to_string(),
            table_block: table.block.to_string(),
            table_number: table.number,
            table_id: table.id.clone(),
            items: lines.to_vec(),
            total_paise: lines_total(lines).paise(),
            order_number: order_number_at(at),
            created_at: at,
            status: OrderStatus::Pending,
        })
    }

    /// Clears a table after its drafted order was persisted: lines dropped,
    /// flags reset, selection released if it pointed at this table.
    pub fn confirm_order(&mut self, table_id: &str) -> CoreResult<()> {
        if self.table(table_id).is_none() {
            return Err(CoreError::UnknownTable(table_id.to_string()));
        }

        self.orders.remove(table_id);
        self.sync_flags(table_id);

        if self.selected.as_deref() == Some(table_id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Re-derives a table's flags from whether it has order lines.
    fn sync_flags(&mut self, table_id: &str) {
        let has_lines = self
            .orders
            .get(table_id)
            .is_some_and(|lines| !lines.is_empty());

        if let Some(table) = self.table_mut(table_id) {
            table.occupied = has_lines;
            table.order_in_progress = has_lines;
        }
    }
}

impl Default for FloorPlan {
    fn default() -> Self {
        FloorPlan::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(id: &str, name: &str, price_paise: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price_paise,
            category: "Main Courses".to_string(),
        }
    }

    fn at() -> DateTime<Utc> {
        "2025-05-02T10:00:00Z".parse().expect("valid timestamp")
    }

    #[test]
    fn test_floor_has_25_tables_in_block_order() {
        let tables = generate_tables();
        assert_eq!(tables.len(), 25);
        assert_eq!(tables[0].id, "A1");
        assert_eq!(tables[4].id, "A5");
        assert_eq!(tables[5].id, "B1");
        assert_eq!(tables[24].id, "E5");
        assert!(tables.iter().all(|t| !t.occupied));
    }

    #[test]
    fn test_add_requires_selection() {
        let mut floor = FloorPlan::new();
        let err = floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap_err();
        assert!(matches!(err, CoreError::NoTableSelected));
    }

    #[test]
    fn test_select_unknown_table() {
        let mut floor = FloorPlan::new();
        let err = floor.select_table("Z9").unwrap_err();
        assert!(matches!(err, CoreError::UnknownTable(_)));
    }

    #[test]
    fn test_add_merges_by_item_id() {
        let mut floor = FloorPlan::new();
        floor.select_table("B3").unwrap();

        let chai = menu_item("m1", "Chai", 1500);
        floor.add_item(&chai).unwrap();
        floor.add_item(&chai).unwrap();
        floor.add_item(&menu_item("m2", "Samosa", 2500)).unwrap();

        let lines = floor.order_lines("B3");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(floor.order_total("B3").paise(), 2 * 1500 + 2500);
    }

    #[test]
    fn test_selection_marks_table_occupied() {
        let mut floor = FloorPlan::new();
        floor.select_table("B3").unwrap();

        let table = floor.selected_table().unwrap();
        assert!(table.occupied);
        assert!(table.order_in_progress);

        // Moving off a table that never got lines releases it
        floor.select_table("C1").unwrap();
        let b3 = floor.tables().iter().find(|t| t.id == "B3").unwrap();
        assert!(!b3.occupied);

        floor.clear_selection();
        let c1 = floor.tables().iter().find(|t| t.id == "C1").unwrap();
        assert!(!c1.occupied);
    }

    #[test]
    fn test_occupancy_follows_lines() {
        let mut floor = FloorPlan::new();
        floor.select_table("A1").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();

        let table = floor.selected_table().unwrap();
        assert!(table.occupied);
        assert!(table.order_in_progress);

        floor.remove_item("m1").unwrap();
        let table = floor.selected_table().unwrap();
        assert!(!table.occupied);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut floor = FloorPlan::new();
        floor.select_table("A1").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();

        floor.update_quantity("m1", 0).unwrap();
        assert!(floor.order_lines("A1").is_empty());
    }

    #[test]
    fn test_update_missing_line() {
        let mut floor = FloorPlan::new();
        floor.select_table("A1").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();

        let err = floor.update_quantity("nope", 2).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound(_)));
    }

    #[test]
    fn test_orders_are_isolated_per_table() {
        let mut floor = FloorPlan::new();
        floor.select_table("A1").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();

        floor.select_table("C2").unwrap();
        floor.add_item(&menu_item("m2", "Samosa", 2500)).unwrap();

        assert_eq!(floor.order_lines("A1").len(), 1);
        assert_eq!(floor.order_lines("C2").len(), 1);
        assert_eq!(floor.order_lines("A1")[0].item_id, "m1");
    }

    #[test]
    fn test_draft_rejects_empty_order() {
        let mut floor = FloorPlan::new();
        floor.select_table("A1").unwrap();

        let err = floor.draft_order(at()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyOrder { .. }));
    }

    #[test]
    fn test_draft_does_not_mutate_floor() {
        let mut floor = FloorPlan::new();
        floor.select_table("D4").unwrap();
        floor.add_item(&menu_item("m1", "Biryani", 22000)).unwrap();

        let order = floor.draft_order(at()).unwrap();
        assert_eq!(order.table_id, "D4");
        assert_eq!(order.table_block, "D");
        assert_eq!(order.table_number, 4);
        assert_eq!(order.total_paise, 22000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_number.starts_with("ORD-"));

        // Floor untouched: the draft is only a record, not a commit
        assert_eq!(floor.order_lines("D4").len(), 1);
        assert!(floor.selected_table().is_some());
    }

    #[test]
    fn test_confirm_clears_table_and_selection() {
        let mut floor = FloorPlan::new();
        floor.select_table("D4").unwrap();
        floor.add_item(&menu_item("m1", "Biryani", 22000)).unwrap();
        let _order = floor.draft_order(at()).unwrap();

        floor.confirm_order("D4").unwrap();

        assert!(floor.order_lines("D4").is_empty());
        assert!(floor.selected_table().is_none());
        let table = floor.tables().iter().find(|t| t.id == "D4").unwrap();
        assert!(!table.occupied);
        assert!(!table.order_in_progress);
    }

    #[test]
    fn test_failed_persist_keeps_order() {
        // Persistence failed: the caller never confirms, so a retry still
        // sees the full order
        let mut floor = FloorPlan::new();
        floor.select_table("E5").unwrap();
        floor.add_item(&menu_item("m1", "Chai", 1500)).unwrap();
        let _order = floor.draft_order(at()).unwrap();

        // no confirm_order call
        assert_eq!(floor.order_lines("E5").len(), 1);
        assert!(floor.selected_table().is_some());
    }
}
