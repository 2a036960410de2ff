//! # Billing Cart
//!
//! The counter-side cart an operator fills before finalizing a bill, plus
//! the finalized [`Bill`] value and a plain-text receipt renderer.
//!
//! ## Cart → Bill → Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   BillCart (mutable, in memory)                                         │
//! │     add / set_quantity / remove / clear                                 │
//! │         │                                                               │
//! │         ▼  finalize(bill_number, at)    - rejects an empty cart        │
//! │   Bill (immutable value)                                                │
//! │         │                                                               │
//! │         ▼  persisted by the service layer                              │
//! │   Transaction (stored record, id assigned by the store)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never talks to the store and never numbers itself: the bill
//! number and timestamp are handed in at finalize time so the sequence is
//! read as late as possible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::businessday::ist;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{lines_total, BillLine, MenuItem};

// =============================================================================
// Restaurant Info
// =============================================================================

/// Letterhead details printed on every receipt.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct RestaurantInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
}

/// The configured restaurant.
pub const RESTAURANT_INFO: RestaurantInfo = RestaurantInfo {
    name: "Spice Route Dhaba",
    address: "42 MG Road, Bengaluru 560001",
    phone: "+91 80 4123 7788",
};

// =============================================================================
// Bill
// =============================================================================

/// A finalized bill: the immutable output of [`BillCart::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    pub items: Vec<BillLine>,
    pub total_paise: i64,
    pub bill_number: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl Bill {
    /// Returns the bill total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Bill Cart
// =============================================================================

/// Mutable working set of lines for the bill being built at the counter.
///
/// Same line semantics as a table order: adds merge by menu-item id, a
/// quantity of zero removes the line, and name/price are snapshotted at
/// first add.
#[derive(Debug, Clone, Default)]
pub struct BillCart {
    lines: Vec<BillLine>,
}

impl BillCart {
    /// An empty cart.
    pub fn new() -> Self {
        BillCart::default()
    }

    /// Loads a cart from existing lines (used when editing a saved bill).
    pub fn from_lines(lines: Vec<BillLine>) -> Self {
        BillCart { lines }
    }

    /// Current lines in add order.
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running total over all lines.
    pub fn total(&self) -> Money {
        lines_total(&self.lines)
    }

    /// Adds one unit of a menu item, merging with an existing line for the
    /// same item.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(BillLine::from_menu_item(item)),
        }
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.item_id == item_id)
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        if quantity <= 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line outright.
    pub fn remove(&mut self, item_id: &str) -> CoreResult<()> {
        self.set_quantity(item_id, 0)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Finalizes the cart into an immutable [`Bill`].
    ///
    /// Rejects an empty cart. The cart itself is left untouched; the caller
    /// clears it only after the bill is persisted.
    pub fn finalize(&self, bill_number: &str, at: DateTime<Utc>) -> CoreResult<Bill> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        Ok(Bill {
            items: self.lines.clone(),
            total_paise: self.total().paise(),
            bill_number: bill_number.to_string(),
            date: at,
        })
    }
}

// =============================================================================
// Receipt Rendering
// =============================================================================

/// Renders a bill as a plain-text receipt for a thermal printer.
///
/// Fixed layout: letterhead, bill number and IST date line, one block per
/// item, total, closing line.
pub fn format_bill_for_print(bill: &Bill) -> String {
    let local = bill.date.with_timezone(&ist());
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n{}\n{}\n\n",
        RESTAURANT_INFO.name, RESTAURANT_INFO.address, RESTAURANT_INFO.phone
    ));
    out.push_str(&format!("Bill #: {}\n", bill.bill_number));
    out.push_str(&format!("Date: {}\n\n", local.format("%-d %b %Y, %H:%M")));
    out.push_str("Items:\n------------------------------------------\n");

    for line in &bill.items {
        out.push_str(&format!(
            "{} x{}\n{} each    {}\n",
            line.name,
            line.quantity,
            line.price(),
            line.line_total()
        ));
    }

    out.push_str("------------------------------------------\n");
    out.push_str(&format!("Total: {}\n\n", bill.total()));
    out.push_str("Thank you for dining with us!\n");
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
