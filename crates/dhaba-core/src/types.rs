//! # Domain Types
//!
//! Core domain types used throughout Dhaba POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │   Transaction   │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  bill_number    │   │  order_number   │       │
//! │  │  price_paise    │   │  total_paise    │   │  table_id       │       │
//! │  │  category       │   │  items          │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BillLine     │   │     Table       │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_id        │   │  block (A..E)   │   │  Pending        │       │
//! │  │  name, price    │   │  number (1..5)  │   │  Completed      │       │
//! │  │  quantity       │   │  occupied       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `BillLine` copies `name` and `price` from the `MenuItem` at add-time.
//! Editing the menu afterwards never changes an open bill or a saved record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// An item on the restaurant menu.
///
/// Created/edited/deleted by administrators; immutable once displayed.
/// The only invariant is a non-negative price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to waiters and on the bill.
    pub name: String,

    /// Price in paise.
    pub price_paise: i64,

    /// Menu section, e.g. "Main Courses".
    pub category: String,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

/// Filters menu items by a search query.
///
/// Case-insensitive substring match against name or category. An empty
/// query returns everything.
pub fn filter_items<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&query)
                || item.category.to_lowercase().contains(&query)
        })
        .collect()
}

// =============================================================================
// Bill Line
// =============================================================================

/// A line item inside an in-progress bill or a table order.
///
/// `name` and `price_paise` are frozen copies of the menu item at add-time.
/// A quantity reaching zero removes the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillLine {
    /// ID of the menu item this line was created from.
    pub item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in paise at time of adding (frozen).
    pub price_paise: i64,

    /// Quantity ordered; always >= 1 while the line exists.
    pub quantity: i64,
}

impl BillLine {
    /// Creates a line with quantity 1 from a menu item, freezing name/price.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        BillLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price_paise: item.price_paise,
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }
}

/// Sums `price × quantity` over a set of lines.
pub fn lines_total(lines: &[BillLine]) -> Money {
    lines.iter().map(BillLine::line_total).sum()
}

// =============================================================================
// Transaction
// =============================================================================

/// The persisted form of a finalized bill.
///
/// May later be edited (items/total/date replaced, id kept) or deleted.
/// The stored `total_paise` is authoritative; it is never recomputed from
/// `items` after finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    pub bill_number: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub total_paise: i64,
    pub items: Vec<BillLine>,
}

impl Transaction {
    /// Returns the stored total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Order
// =============================================================================

/// Kitchen order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Sent to the kitchen, not yet prepared.
    Pending,
    /// Marked done by the kitchen.
    Completed,
}

impl OrderStatus {
    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record of items sent from a table to the kitchen.
///
/// Distinct from a billing [`Transaction`]; orders carry their own
/// timestamp-suffixed identifier sequence (`ORD-123456`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub table_block: String,
    pub table_number: u8,
    pub table_id: String,
    pub items: Vec<BillLine>,
    pub total_paise: i64,
    pub order_number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Table
// =============================================================================

/// Floor block letter. Five blocks, A through E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TableBlock {
    A,
    B,
    C,
    D,
    E,
}

impl TableBlock {
    /// All blocks in floor order.
    pub const ALL: [TableBlock; 5] = [
        TableBlock::A,
        TableBlock::B,
        TableBlock::C,
        TableBlock::D,
        TableBlock::E,
    ];

    /// Block letter for display and table ids.
    pub fn as_char(&self) -> char {
        match self {
            TableBlock::A => 'A',
            TableBlock::B => 'B',
            TableBlock::C => 'C',
            TableBlock::D => 'D',
            TableBlock::E => 'E',
        }
    }
}

impl fmt::Display for TableBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the fixed set of 25 physical tables.
///
/// Generated once at startup, never persisted. `occupied` and
/// `order_in_progress` are derived flags maintained by the floor tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub block: TableBlock,
    /// Table number within the block, 1 through 5.
    pub number: u8,
    /// Compound id, e.g. "A1".
    pub id: String,
    pub occupied: bool,
    pub order_in_progress: bool,
}

impl Table {
    /// Creates a free table for the given block/number.
    pub fn new(block: TableBlock, number: u8) -> Self {
        Table {
            block,
            number,
            id: format!("{}{}", block.as_char(), number),
            occupied: false,
            order_in_progress: false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(id: &str, name: &str, price_paise: i64, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price_paise,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_bill_line_snapshot() {
        let mut item = menu_item("m1", "Masala Dosa", 9000, "Main Courses");
        let line = BillLine::from_menu_item(&item);

        // A later menu price change must not affect the line
        item.price_paise = 12000;

        assert_eq!(line.price_paise, 9000);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.line_total().paise(), 9000);
    }

    #[test]
    fn test_lines_total() {
        let lines = vec![
            BillLine {
                item_id: "a".into(),
                name: "Chai".into(),
                price_paise: 1500,
                quantity: 2,
            },
            BillLine {
                item_id: "b".into(),
                name: "Samosa".into(),
                price_paise: 2500,
                quantity: 3,
            },
        ];

        assert_eq!(lines_total(&lines).paise(), 2 * 1500 + 3 * 2500);
    }

    #[test]
    fn test_filter_items() {
        let items = vec![
            menu_item("1", "Paneer Tikka", 18000, "Starters"),
            menu_item("2", "Butter Naan", 4000, "Breads"),
            menu_item("3", "Garlic Naan", 5000, "Breads"),
        ];

        assert_eq!(filter_items(&items, "naan").len(), 2);
        assert_eq!(filter_items(&items, "STARTERS").len(), 1);
        assert_eq!(filter_items(&items, "").len(), 3);
        assert_eq!(filter_items(&items, "biryani").len(), 0);
    }

    #[test]
    fn test_order_status_roundtrip() {
        assert_eq!(OrderStatus::parse("pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("completed"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("bogus"), None);
        assert_eq!(OrderStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn test_table_id_format() {
        let table = Table::new(TableBlock::C, 4);
        assert_eq!(table.id, "C4");
        assert!(!table.occupied);
        assert!(!table.order_in_progress);
    }
}
