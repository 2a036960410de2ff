//! # Billing Session
//!
//! State for the billing and history screens: the working cart, the cached
//! transaction list, edit mode, and CSV export.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NEW BILL                                                               │
//! │    finalize_bill(None)                                                  │
//! │      1. scan stored bill numbers → next number (max + 1)               │
//! │      2. cart.finalize(number, now) → Bill (rejects empty cart)         │
//! │      3. INSERT transaction (fresh UUID)                                 │
//! │      4. on success only: update cache, clear cart                       │
//! │                                                                         │
//! │  EDITED BILL (begin_edit loaded an existing record into the cart)      │
//! │    finalize_bill(None)                                                  │
//! │      1. keep the ORIGINAL id and bill number                           │
//! │      2. UPDATE items / total / date in place                           │
//! │      3. on success only: replace in cache, clear cart, leave edit mode │
//! │                                                                         │
//! │  The number scan runs at save time, not when the screen opened, so    │
//! │  two counters racing produce adjacent numbers as long as their saves  │
//! │  don't interleave. A clash is two bills sharing a display number -    │
//! │  annoying, not corrupting - since the UUID stays unique.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use dhaba_core::aggregate::{daily_totals, filter_daily, flatten_for_export, DailyTotal, DateRange};
use dhaba_core::export::{export_filename, render_csv};
use dhaba_core::{next_bill_number, BillCart, CoreError, MenuItem, Transaction};
use dhaba_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// A rendered CSV download: filename plus file content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Per-screen session for billing and transaction history.
#[derive(Debug)]
pub struct BillingSession {
    db: Database,
    cart: BillCart,
    /// Cached transactions, newest first (store order).
    transactions: Vec<Transaction>,
    /// The original record while a saved bill is being edited.
    editing: Option<Transaction>,
}

impl BillingSession {
    /// Creates the session and loads the transaction history.
    pub async fn new(db: Database) -> ServiceResult<Self> {
        let transactions = db.transactions().list_all().await?;
        info!(count = transactions.len(), "Transaction history loaded");

        Ok(BillingSession {
            db,
            cart: BillCart::new(),
            transactions,
            editing: None,
        })
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Cached transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Per-business-day aggregation of the cached transactions, newest day
    /// first.
    pub fn daily(&self) -> Vec<DailyTotal> {
        daily_totals(&self.transactions)
    }

    /// Re-reads the transaction list from the store.
    pub async fn refresh(&mut self) -> ServiceResult<()> {
        self.transactions = self.db.transactions().list_all().await?;
        Ok(())
    }

    /// Deletes a saved transaction. An interior bill number stays a gap;
    /// deleting the newest bill lets its number be reissued.
    pub async fn delete_transaction(&mut self, id: &str) -> ServiceResult<()> {
        self.db.transactions().delete(id).await?;
        self.transactions.retain(|t| t.id != id);
        info!(id = %id, "Transaction deleted");
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The working cart.
    pub fn cart(&self) -> &BillCart {
        &self.cart
    }

    /// Adds one unit of a menu item to the cart.
    pub fn add_to_cart(&mut self, item: &MenuItem) {
        self.cart.add(item);
    }

    /// Sets a cart line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> ServiceResult<()> {
        if quantity > 0 {
            dhaba_core::validation::validate_quantity(quantity).map_err(CoreError::from)?;
        }
        self.cart.set_quantity(item_id, quantity).map_err(ServiceError::from)
    }

    /// Removes a cart line.
    pub fn remove_from_cart(&mut self, item_id: &str) -> ServiceResult<()> {
        self.cart.remove(item_id).map_err(ServiceError::from)
    }

    /// Empties the cart. Leaves edit mode untouched; use
    /// [`cancel_edit`](Self::cancel_edit) to abandon an edit.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Edit Mode
    // =========================================================================

    /// Whether a saved bill is currently loaded for editing.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Loads a saved transaction into the cart for editing. Finalizing
    /// afterwards updates the record in place, keeping its id and number.
    pub fn begin_edit(&mut self, transaction_id: &str) -> ServiceResult<()> {
        let original = self
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Transaction", transaction_id))?;

        self.cart = BillCart::from_lines(original.items.clone());
        self.editing = Some(original);
        Ok(())
    }

    /// Abandons the current edit: cart emptied, stored record untouched.
    pub fn cancel_edit(&mut self) {
        self.cart.clear();
        self.editing = None;
    }

    // =========================================================================
    // Finalize
    // =========================================================================

    /// Preview of the number the next bill would get, from the cached list.
    /// The actual number is recomputed against the store at save time.
    pub fn preview_bill_number(&self) -> String {
        next_bill_number(self.transactions.iter().map(|t| t.bill_number.as_str()))
    }

    /// Finalizes the cart into a stored transaction.
    ///
    /// `custom_number` overrides the generated bill number (manual books
    /// imports). In edit mode the original id and number are kept and the
    /// record is updated in place. The cart is cleared only after the
    /// write succeeds.
    pub async fn finalize_bill(
        &mut self,
        custom_number: Option<&str>,
    ) -> ServiceResult<Transaction> {
        if let Some(original) = self.editing.clone() {
            let number = custom_number.unwrap_or(&original.bill_number);
            let bill = self.cart.finalize(number, Utc::now())?;

            let updated = Transaction {
                id: original.id.clone(),
                bill_number: bill.bill_number,
                date: bill.date,
                total_paise: bill.total_paise,
                items: bill.items,
            };
            self.db.transactions().update(&updated).await?;

            if let Some(slot) = self.transactions.iter_mut().find(|t| t.id == updated.id) {
                *slot = updated.clone();
            }
            self.cart.clear();
            self.editing = None;

            info!(id = %updated.id, bill_number = %updated.bill_number, "Bill updated");
            return Ok(updated);
        }

        // Read the sequence as late as possible so concurrent counters
        // don't both see a stale maximum
        let number = match custom_number {
            Some(n) => n.to_string(),
            None => next_bill_number(
                self.db
                    .transactions()
                    .bill_numbers()
                    .await?
                    .iter()
                    .map(String::as_str),
            ),
        };

        let bill = self.cart.finalize(&number, Utc::now())?;
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            bill_number: bill.bill_number,
            date: bill.date,
            total_paise: bill.total_paise,
            items: bill.items,
        };

        self.db.transactions().insert(&transaction).await?;

        self.transactions.insert(0, transaction.clone());
        self.cart.clear();

        info!(
            id = %transaction.id,
            bill_number = %transaction.bill_number,
            total_paise = transaction.total_paise,
            "Bill finalized"
        );
        Ok(transaction)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Renders the (optionally date-filtered) history as a CSV download.
    ///
    /// Errors with [`ErrorCode::NothingToExport`](crate::ErrorCode) when no
    /// transaction matches the range; no file is produced.
    pub fn export_csv(&self, range: DateRange) -> ServiceResult<CsvExport> {
        let totals = filter_daily(&self.daily(), range);
        let rows = flatten_for_export(&totals);

        if rows.is_empty() {
            return Err(ServiceError::nothing_to_export());
        }

        Ok(CsvExport {
            filename: export_filename(range),
            content: render_csv(&rows),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
