//! # Identifier Generators
//!
//! Two separate human-facing identifier sequences:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BILL NUMBERS        bill-1, bill-2, bill-3, ...                        │
//! │    Sequence-based: scan existing records, take max + 1.                 │
//! │    Interior gaps left by deletions are never refilled; only a deleted   │
//! │    maximum can be reissued.                                              │
//! │                                                                         │
//! │  ORDER NUMBERS       ORD-483920                                         │
//! │    Timestamp-based: last six digits of the epoch milliseconds.          │
//! │    No scan needed; uniqueness is probabilistic, acceptable for a        │
//! │    kitchen display where numbers only need to be distinct for the       │
//! │    orders currently on screen.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither generator writes anything; callers persist the result.

use chrono::{DateTime, Utc};

/// Prefix of the billing sequence.
pub const BILL_PREFIX: &str = "bill-";

/// Prefix of the kitchen-order sequence.
pub const ORDER_PREFIX: &str = "ORD-";

// =============================================================================
// Bill Numbers
// =============================================================================

/// Computes the next bill number from the existing bill numbers.
///
/// Only strings matching `bill-<digits>` exactly participate; anything else
/// (legacy formats, free-text imports) is ignored rather than rejected.
/// With no matching numbers at all the sequence starts at `bill-1`.
///
/// Read-only; the caller persists the returned number. Two callers reading
/// the same store state will get the same answer, which is why finalization
/// recomputes the number at save time rather than caching it.
pub fn next_bill_number<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(parse_bill_number)
        .max()
        .unwrap_or(0);

    format!("{}{}", BILL_PREFIX, max + 1)
}

/// Extracts the numeric part of a `bill-<digits>` string, rejecting
/// anything that deviates from the pattern.
fn parse_bill_number(s: &str) -> Option<u64> {
    let digits = s.strip_prefix(BILL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Derives an order number from a specific instant: `ORD-` plus the last
/// six digits of the epoch milliseconds, zero-padded.
pub fn order_number_at(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis();
    format!("{}{:06}", ORDER_PREFIX, millis.rem_euclid(1_000_000))
}

/// Generates an order number for the current instant.
pub fn new_order_number() -> String {
    order_number_at(Utc::now())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_starts_at_one() {
        assert_eq!(next_bill_number([]), "bill-1");
    }

    #[test]
    fn test_max_plus_one() {
        let existing = ["bill-1", "bill-7", "bill-3"];
        assert_eq!(next_bill_number(existing), "bill-8");
    }

    #[test]
    fn test_gaps_are_not_reused() {
        // bill-2 was deleted; the next number continues past the max
        let existing = ["bill-1", "bill-3"];
        assert_eq!(next_bill_number(existing), "bill-4");
    }

    #[test]
    fn test_non_conforming_numbers_are_ignored() {
        let existing = ["INV-99", "bill-", "bill-2x", "bill 5", "Bill-9", "bill-4"];
        assert_eq!(next_bill_number(existing), "bill-5");
    }

    #[test]
    fn test_all_non_conforming_falls_back_to_one() {
        let existing = ["INV-99", "walk-in"];
        assert_eq!(next_bill_number(existing), "bill-1");
    }

    #[test]
    fn test_no_leading_zero_tricks() {
        // "bill-007" is digits-only, so it participates with value 7
        let existing = ["bill-007"];
        assert_eq!(next_bill_number(existing), "bill-8");
    }

    #[test]
    fn test_order_number_last_six_digits() {
        let at = "2025-05-02T10:00:00Z".parse().expect("valid timestamp");
        // 1746180000000 ms → last six digits 000000
        assert_eq!(order_number_at(at), "ORD-000000");

        let at = "2025-05-02T10:00:01.234Z".parse().expect("valid timestamp");
        assert_eq!(order_number_at(at), "ORD-001234");
    }

    #[test]
    fn test_order_number_shape() {
        let n = new_order_number();
        assert!(n.starts_with("ORD-"));
        assert_eq!(n.len(), 10);
        assert!(n[4..].bytes().all(|b| b.is_ascii_digit()));
    }
}
