//! # Transaction Aggregator
//!
//! Groups a flat list of transactions into per-business-day totals for the
//! history screen, plus the filtering and flattening views built on top.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Vec<Transaction>  (unordered, straight from the store)               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   daily_totals()         ── BTreeMap keyed by business day             │
//! │         │                   (at most ONE DailyTotal per key,           │
//! │         ▼                    deduplication by construction)            │
//! │   Vec<DailyTotal>        ── newest day first                           │
//! │         │                                                               │
//! │         ├──► filter_daily(range)      pure view, bounds inclusive      │
//! │         │                                                               │
//! │         └──► flatten_for_export()     chronological ASCENDING rows     │
//! │                                       for CSV export                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The map-keyed accumulation is deliberate: accumulating into a plain list
//! can yield duplicate day entries when re-run, which shows up as the same
//! date twice in the history accordion.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::businessday::BusinessDay;
use crate::money::Money;
use crate::types::Transaction;

// =============================================================================
// Daily Total
// =============================================================================

/// Aggregate of all transactions that fall on one business day.
///
/// Derived, never persisted; recomputed whenever the transaction list
/// changes. `total` sums the STORED transaction totals - items are not
/// re-priced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyTotal {
    /// Business day this group belongs to (`YYYY-MM-DD` when serialized).
    #[ts(as = "String")]
    pub day: BusinessDay,

    /// Sum of the member transactions' stored totals.
    pub total: Money,

    /// Member transactions with their original timestamps, sorted by
    /// timestamp ascending (chronological within the day).
    pub transactions: Vec<Transaction>,

    /// Display label derived from `day`, e.g. `2 May 2025`.
    pub formatted_date: String,
}

impl DailyTotal {
    /// Sortable grouping key, `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        self.day.key()
    }
}

/// Groups transactions by business day.
///
/// ## Guarantees
/// - At most one `DailyTotal` per distinct business-day key, for any input
///   (including duplicate-timestamp transactions).
/// - Days are ordered newest first.
/// - Within a day, transactions are ordered by timestamp ascending.
/// - Conservation: the sum of day totals equals the sum of input totals.
pub fn daily_totals(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

    for tx in transactions {
        let day = BusinessDay::of(tx.date);
        let entry = days.entry(day.date()).or_insert_with(|| DailyTotal {
            day,
            total: Money::zero(),
            transactions: Vec::new(),
            formatted_date: day.formatted(),
        });
        entry.total += tx.total();
        entry.transactions.push(tx.clone());
    }

    let mut totals: Vec<DailyTotal> = days.into_values().collect();
    // BTreeMap iterates ascending; the history view wants newest first
    totals.reverse();

    for day in &mut totals {
        day.transactions.sort_by_key(|tx| tx.date);
    }

    totals
}

// =============================================================================
// Date-Range Filter
// =============================================================================

/// Inclusive civil-date range; a missing bound means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range (matches everything).
    pub fn all() -> Self {
        DateRange::default()
    }

    /// Range bounded on both sides.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether a business day falls within the range. Both bounds are
    /// inclusive: a day exactly equal to `end` is in.
    pub fn contains(&self, day: BusinessDay) -> bool {
        let d = day.date();
        self.start.map_or(true, |s| d >= s) && self.end.map_or(true, |e| d <= e)
    }
}

/// Retains only the daily totals whose business day falls in `range`.
///
/// A pure view: the unfiltered aggregate is never mutated.
pub fn filter_daily(totals: &[DailyTotal], range: DateRange) -> Vec<DailyTotal> {
    totals
        .iter()
        .filter(|t| range.contains(t.day))
        .cloned()
        .collect()
}

// =============================================================================
// Export Flattening
// =============================================================================

/// One exportable row: a transaction tagged with its business-day key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportRow {
    pub transaction: Transaction,
    /// Business-day key (`YYYY-MM-DD`) of the group the transaction sits in.
    pub business_day: String,
}

/// Flattens (possibly filtered) daily totals into a single chronological
/// list for export.
///
/// Rows are sorted by transaction timestamp ASCENDING - deliberately the
/// opposite of the newest-first day-level view, because exports are read
/// oldest-first. The two orderings are separate named operations; neither
/// is inferred from the other.
pub fn flatten_for_export(totals: &[DailyTotal]) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = totals
        .iter()
        .flat_map(|day| {
            day.transactions.iter().map(|tx| ExportRow {
                transaction: tx.clone(),
                business_day: day.key(),
            })
        })
        .collect();

    rows.sort_by_key(|row| row.transaction.date);
    rows
}

// =============================================================================
// Unit Tests
// =============================================================================
