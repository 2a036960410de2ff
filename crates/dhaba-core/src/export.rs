//! # CSV Export
//!
//! Renders transactions into the spreadsheet file the owner downloads from
//! the history screen.
//!
//! ## File Shape
//! ```text
//! Bill Number,Date,Time,Amount,Items
//! bill-1,02/05/2025,09:15,450.50,"Masala Dosa (2x₹90.00); Filter Coffee (1x₹30.00)"
//! bill-2,02/05/2025,13:40,210.00,"Veg Thali (1x₹210.00)"
//!
//! Total,,,660.50,
//! ```
//!
//! - Dates and times are IST wall-clock, `dd/mm/yyyy` and 24-hour `HH:MM`.
//! - Amounts are plain decimals; the `₹` sign appears only inside the
//!   quoted item cell, never in the amount column, so spreadsheet imports
//!   parse it as a number.
//! - Rows are CHRONOLOGICAL (oldest first); the trailing total row is
//!   preceded by a blank line.

use crate::aggregate::{DateRange, ExportRow};
use crate::businessday::ist;
use crate::money::Money;
use crate::types::Transaction;

/// Column header line.
pub const CSV_HEADER: &str = "Bill Number,Date,Time,Amount,Items";

/// Renders export rows (already sorted by
/// [`flatten_for_export`](crate::aggregate::flatten_for_export)) into the
/// full CSV document, including the trailing total row.
///
/// The total row sums the STORED transaction totals, so it always matches
/// the sum of the amount column.
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    let mut total = Money::zero();
    for row in rows {
        csv.push_str(&render_line(&row.transaction));
        csv.push('\n');
        total += row.transaction.total();
    }

    csv.push_str(&format!("\nTotal,,,{},\n", total.plain()));
    csv
}

/// One data row: bill number, IST date, IST time, plain amount, quoted
/// item summary.
fn render_line(tx: &Transaction) -> String {
    let local = tx.date.with_timezone(&ist());

    let items = tx
        .items
        .iter()
        .map(|line| format!("{} ({}x₹{})", line.name, line.quantity, line.price().plain()))
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{},{},{},{},\"{}\"",
        tx.bill_number,
        local.format("%d/%m/%Y"),
        local.format("%H:%M"),
        tx.total().plain(),
        // Item names may contain quotes; double them per CSV quoting rules
        items.replace('"', "\"\"")
    )
}

/// Builds the download filename, embedding whichever range bounds were
/// applied: `transactions_2025-05-01_to_2025-05-31.csv`,
/// `transactions_from_...`, `transactions_until_...`, or plain
/// `transactions.csv`.
pub fn export_filename(range: DateRange) -> String {
    let mut name = String::from("transactions");
    match (range.start, range.end) {
        (Some(start), Some(end)) => {
            name.push_str(&format!("_{}_to_{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")));
        }
        (Some(start), None) => {
            name.push_str(&format!("_from_{}", start.format("%Y-%m-%d")));
        }
        (None, Some(end)) => {
            name.push_str(&format!("_until_{}", end.format("%Y-%m-%d")));
        }
        (None, None) => {}
    }
    name.push_str(".csv");
    name
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{daily_totals, flatten_for_export};
    use crate::types::BillLine;
    use chrono::{DateTime, NaiveDate, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC 3339 timestamp")
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn tx(bill: &str, at: &str, items: Vec<BillLine>) -> Transaction {
        let total_paise = items.iter().map(|l| l.price_paise * l.quantity).sum();
        Transaction {
            id: bill.to_string(),
            bill_number: bill.to_string(),
            date: utc(at),
            total_paise,
            items,
        }
    }

    fn line(name: &str, price_paise: i64, quantity: i64) -> BillLine {
        BillLine {
            item_id: name.to_string(),
            name: name.to_string(),
            price_paise,
            quantity,
        }
    }

    #[test]
    fn test_full_document() {
        // 03:45 UTC = 09:15 IST; 08:10 UTC = 13:40 IST
        let txs = vec![
            tx(
                "bill-2",
                "2025-05-02T08:10:00Z",
                vec![line("Veg Thali", 21000, 1)],
            ),
            tx(
                "bill-1",
                "2025-05-02T03:45:00Z",
                vec![line("Masala Dosa", 9000, 2), line("Filter Coffee", 3000, 1)],
            ),
        ];

        let rows = flatten_for_export(&daily_totals(&txs));
        let csv = render_csv(&rows);

        let expected = "Bill Number,Date,Time,Amount,Items\n\
            bill-1,02/05/2025,09:15,210.00,\"Masala Dosa (2x₹90.00); Filter Coffee (1x₹30.00)\"\n\
            bill-2,02/05/2025,13:40,210.00,\"Veg Thali (1x₹210.00)\"\n\
            \nTotal,,,420.00,\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_total_row_matches_amount_column() {
        let txs = vec![
            tx("bill-1", "2025-05-01T10:00:00Z", vec![line("Chai", 1500, 3)]),
            tx("bill-2", "2025-05-02T10:00:00Z", vec![line("Samosa", 2500, 2)]),
        ];
        let rows = flatten_for_export(&daily_totals(&txs));
        let csv = render_csv(&rows);

        assert!(csv.ends_with("\nTotal,,,95.00,\n"));
    }

    #[test]
    fn test_quotes_in_item_names_are_escaped() {
        let txs = vec![tx(
            "bill-1",
            "2025-05-02T10:00:00Z",
            vec![line("Chef's \"Special\"", 10000, 1)],
        )];
        let rows = flatten_for_export(&daily_totals(&txs));
        let csv = render_csv(&rows);

        assert!(csv.contains("\"Chef's \"\"Special\"\" (1x₹100.00)\""));
    }

    #[test]
    fn test_empty_rows_still_render_header_and_total() {
        let csv = render_csv(&[]);
        assert_eq!(csv, "Bill Number,Date,Time,Amount,Items\n\nTotal,,,0.00,\n");
    }

    #[test]
    fn test_filename_variants() {
        assert_eq!(export_filename(DateRange::all()), "transactions.csv");
        assert_eq!(
            export_filename(DateRange::between(date("2025-05-01"), date("2025-05-31"))),
            "transactions_2025-05-01_to_2025-05-31.csv"
        );
        assert_eq!(
            export_filename(DateRange {
                start: Some(date("2025-05-01")),
                end: None
            }),
            "transactions_from_2025-05-01.csv"
        );
        assert_eq!(
            export_filename(DateRange {
                start: None,
                end: Some(date("2025-05-31"))
            }),
            "transactions_until_2025-05-31.csv"
        );
    }
}
