// 📅 Precision-Aware Interval Model
// Converts a (date, precision) pair into the closed range of all dates
// consistent with that precision, then clamps to the analysis window.
//
// This is the ONE shared interval-construction utility: coverage, the joint
// residence matcher, and the travel analyzer all build ranges here so the
// rounding rules can never drift apart.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DatePrecision, TimelineEntry};

// ============================================================================
// ANALYSIS WINDOW
// ============================================================================

/// The fixed calendar interval over which continuity is required
/// (typically the prior five years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        AnalysisWindow { start, end }
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

// ============================================================================
// INTERVAL
// ============================================================================

/// A closed date range [start, end], always clamped to the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    /// Inclusive day count.
    pub fn days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

// ============================================================================
// CALENDAR HELPERS
// ============================================================================

/// Last day of the given month, respecting real calendar length (28-31).
/// February in leap years resolves to the 29th.
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Callers only pass (year, month) taken from an existing valid NaiveDate.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .expect("first of month always has a predecessor")
}

/// Earliest possible date for the given precision.
pub fn precision_range_start(d: NaiveDate, precision: DatePrecision) -> NaiveDate {
    use chrono::Datelike;
    match precision {
        DatePrecision::Day => d,
        DatePrecision::Month => {
            NaiveDate::from_ymd_opt(d.year(), d.month(), 1).expect("first of month is valid")
        }
        DatePrecision::Year => {
            NaiveDate::from_ymd_opt(d.year(), 1, 1).expect("Jan 1 is valid")
        }
    }
}

/// Latest possible date for the given precision.
pub fn precision_range_end(d: NaiveDate, precision: DatePrecision) -> NaiveDate {
    use chrono::Datelike;
    match precision {
        DatePrecision::Day => d,
        DatePrecision::Month => last_day_of_month(d.year(), d.month()),
        DatePrecision::Year => {
            NaiveDate::from_ymd_opt(d.year(), 12, 31).expect("Dec 31 is valid")
        }
    }
}

/// Inclusive day count between two dates.
pub fn days_inclusive(d1: NaiveDate, d2: NaiveDate) -> i64 {
    (d2 - d1).num_days() + 1
}

/// Whether two closed ranges intersect.
pub fn ranges_overlap(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start.max(b_start) <= a_end.min(b_end)
}

pub fn next_day(d: NaiveDate) -> NaiveDate {
    d + Duration::days(1)
}

pub fn prev_day(d: NaiveDate) -> NaiveDate {
    d - Duration::days(1)
}

// ============================================================================
// INTERVAL CONSTRUCTION
// ============================================================================

/// Build the clamped interval for a timeline entry.
///
/// Returns None when the entry's full precision range falls entirely outside
/// the window; otherwise the range truncated at any boundary it crosses.
/// An open end (date_to=None) covers through window end at day precision.
///
/// Pure and total: malformed precision values cannot exist (enum), and no
/// input produces an error.
pub fn to_interval<E: TimelineEntry + ?Sized>(entry: &E, window: &AnalysisWindow) -> Option<Interval> {
    let start = precision_range_start(entry.date_from(), entry.from_precision());

    let end = match entry.date_to() {
        Some(d) => precision_range_end(d, entry.to_precision()),
        // "Present": covers through the end of the window, day precision
        None => window.end,
    };

    // Fully outside the window
    if end < window.start || start > window.end {
        return None;
    }

    Some(Interval {
        start: start.max(window.start),
        end: end.min(window.end),
    })
}

/// Build sorted, clamped intervals for a slice of entries.
/// Out-of-window entries are dropped; ordering is (start, end).
pub fn build_intervals<E: TimelineEntry>(entries: &[E], window: &AnalysisWindow) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = entries
        .iter()
        .filter_map(|e| to_interval(e, window))
        .collect();
    intervals.sort_by_key(|iv| (iv.start, iv.end));
    intervals
}

// ============================================================================
// TESTS
// ============================================================================
