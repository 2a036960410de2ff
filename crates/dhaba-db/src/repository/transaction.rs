//! # Transaction Repository
//!
//! Database operations for finalized bills.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. INSERT        finalize_bill → insert() with fresh UUID             │
//! │  2. (OPTIONAL)    edit on the history screen → update() keeps the id   │
//! │                   AND the bill number, replaces items/total/date       │
//! │  3. (OPTIONAL)    delete() → interior numbers become permanent gaps;   │
//! │                   only the newest number can be reissued                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item lines live in a JSON TEXT column: they are write-once snapshots
//! read back whole, never queried individually.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dhaba_core::{BillLine, Transaction};

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Lists all transactions, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, bill_number, date, total_paise, items
            FROM transactions
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, bill_number, date, total_paise, items
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_transaction).transpose()
    }

    /// All stored bill numbers, for the next-number scan.
    pub async fn bill_numbers(&self) -> DbResult<Vec<String>> {
        let numbers: Vec<String> = sqlx::query_scalar("SELECT bill_number FROM transactions")
            .fetch_all(&self.pool)
            .await?;
        Ok(numbers)
    }

    /// Inserts a finalized bill.
    pub async fn insert(&self, tx: &Transaction) -> DbResult<()> {
        debug!(id = %tx.id, bill_number = %tx.bill_number, "Inserting transaction");

        let items = serde_json::to_string(&tx.items)?;
        sqlx::query(
            r#"
            INSERT INTO transactions (id, bill_number, date, total_paise, items)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.bill_number)
        .bind(tx.date)
        .bind(tx.total_paise)
        .bind(items)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces a transaction's contents in place.
    ///
    /// The id stays; bill number, date, total, and items are overwritten.
    /// Used when a bill is edited from the history screen.
    pub async fn update(&self, tx: &Transaction) -> DbResult<()> {
        debug!(id = %tx.id, bill_number = %tx.bill_number, "Updating transaction");

        let items = serde_json::to_string(&tx.items)?;
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET bill_number = ?2, date = ?3, total_paise = ?4, items = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.bill_number)
        .bind(tx.date)
        .bind(tx.total_paise)
        .bind(items)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", &tx.id));
        }
        Ok(())
    }

    /// Deletes a transaction.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }
        Ok(())
    }
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> DbResult<Transaction> {
    let items_json: String = row.try_get("items")?;
    let items: Vec<BillLine> = serde_json::from_str(&items_json)?;
    let date: DateTime<Utc> = row.try_get("date")?;

    Ok(Transaction {
        id: row.try_get("id")?,
        bill_number: row.try_get("bill_number")?,
        date,
        total_paise: row.try_get("total_paise")?,
        items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
