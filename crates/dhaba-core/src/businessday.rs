//! # Business-Day Calculator
//!
//! Maps a timestamp to the restaurant's operating day.
//!
//! ## The 4 AM Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The restaurant trades past midnight. Its "day" runs                    │
//! │  4:00 AM → 3:59:59 AM the next calendar day, in IST (UTC+5:30).        │
//! │                                                                         │
//! │  IST wall clock      business day                                      │
//! │  ───────────────     ─────────────                                     │
//! │  May 2, 03:59:59  →  May 1   (late-night bill, previous day's books)  │
//! │  May 2, 04:00:00  →  May 2   (first bill of the new day)              │
//! │  May 2, 23:30:00  →  May 2                                             │
//! │                                                                         │
//! │  The boundary is exact. An off-by-one-minute error here misfiles      │
//! │  revenue into the wrong day's report.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All math happens in a FIXED IST offset, never the host timezone: the
//! grouping key and the display label are both derived from the same IST
//! date so they cannot diverge near midnight.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::BUSINESS_DAY_START_HOUR;

/// Indian Standard Time, UTC+5:30. IST has no daylight saving, so a fixed
/// offset is exact year-round.
pub fn ist() -> FixedOffset {
    // 5h30m east of UTC; in range, so construction cannot fail
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is valid")
}

/// A restaurant business day: a civil date in IST under the 4 AM rule.
///
/// Ordering and equality follow the civil date, so `BusinessDay` works
/// directly as an ordered grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusinessDay(NaiveDate);

impl BusinessDay {
    /// Computes the business day a timestamp belongs to.
    ///
    /// ## Algorithm
    /// 1. Convert the timestamp to IST wall-clock time.
    /// 2. If the IST hour is in [0, 4), the bill belongs to the previous
    ///    calendar day; otherwise to the current one.
    ///
    /// Total function: every timestamp maps to exactly one business day.
    pub fn of(timestamp: DateTime<Utc>) -> Self {
        let local = timestamp.with_timezone(&ist());
        let date = local.date_naive();

        if local.hour() < BUSINESS_DAY_START_HOUR {
            // checked_sub_days only fails at NaiveDate::MIN
            BusinessDay(
                date.checked_sub_days(Days::new(1))
                    .expect("date within calendar range"),
            )
        } else {
            BusinessDay(date)
        }
    }

    /// The underlying civil date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Sortable grouping key: `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Human-readable label, e.g. `2 May 2025`.
    ///
    /// Derived from the business-day date itself, not the original
    /// timestamp, so key and label always name the same day.
    pub fn formatted(&self) -> String {
        self.0.format("%-d %b %Y").to_string()
    }

    /// Start of the business day as an absolute instant (4:00 AM IST).
    pub fn starts_at(&self) -> DateTime<Utc> {
        let local = self
            .0
            .and_hms_opt(BUSINESS_DAY_START_HOUR, 0, 0)
            .expect("4:00:00 is a valid time");
        match ist().from_local_datetime(&local) {
            chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
            // Fixed offsets have no gaps or folds
            _ => unreachable!("fixed offset conversion is unambiguous"),
        }
    }
}

impl std::fmt::Display for BusinessDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().expect("valid RFC 3339 timestamp")
    }

    #[test]
    fn test_before_cutover_belongs_to_previous_day() {
        // 03:59 IST on May 2 = 22:29 UTC on May 1
        let day = BusinessDay::of(utc("2025-05-01T22:29:00Z"));
        assert_eq!(day.key(), "2025-05-01");
    }

    #[test]
    fn test_at_cutover_belongs_to_current_day() {
        // 04:00 IST on May 2 = 22:30 UTC on May 1
        let day = BusinessDay::of(utc("2025-05-01T22:30:00Z"));
        assert_eq!(day.key(), "2025-05-02");
    }

    #[test]
    fn test_boundary_is_exact_to_the_second() {
        // 03:59:59 IST → previous day; one second later → current day
        let before = BusinessDay::of(utc("2025-05-01T22:29:59Z"));
        let after = BusinessDay::of(utc("2025-05-01T22:30:00Z"));
        assert_eq!(before.key(), "2025-05-01");
        assert_eq!(after.key(), "2025-05-02");
    }

    #[test]
    fn test_daytime_keeps_calendar_date() {
        // 13:00 IST on May 2 = 07:30 UTC on May 2
        let day = BusinessDay::of(utc("2025-05-02T07:30:00Z"));
        assert_eq!(day.key(), "2025-05-02");
    }

    #[test]
    fn test_host_timezone_is_irrelevant() {
        // 23:45 UTC on Dec 31 = 05:15 IST on Jan 1 → business day Jan 1,
        // even though the UTC calendar date is still December 31
        let day = BusinessDay::of(utc("2024-12-31T23:45:00Z"));
        assert_eq!(day.key(), "2025-01-01");
    }

    #[test]
    fn test_month_rollback_across_cutover() {
        // 01:00 IST on June 1 → business day May 31
        let day = BusinessDay::of(utc("2025-05-31T19:30:00Z"));
        assert_eq!(day.key(), "2025-05-31");
    }

    #[test]
    fn test_formatted_label_matches_key() {
        let day = BusinessDay::of(utc("2025-05-01T22:29:00Z"));
        assert_eq!(day.formatted(), "1 May 2025");
    }

    #[test]
    fn test_starts_at_round_trips() {
        let day = BusinessDay::of(utc("2025-05-02T07:30:00Z"));
        // The instant the day starts must itself map back to that day
        assert_eq!(BusinessDay::of(day.starts_at()), day);
    }
}
