// 🗓️ Date Normalization - intake strings to comparable (date, precision)
// Month-only dates anchor to the 1st, year-only to Jan 1; precision is
// ALWAYS tracked separately. Invalid input never panics and never errors -
// it comes back as an unrecognized NormalizedDate for the glue layer to
// turn into an Issue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DatePrecision;

// ============================================================================
// NORMALIZED DATE
// ============================================================================

/// Result of parsing one intake date string.
///
/// - `value` is the anchor date when the input was recognized
/// - `precision` is None when the input was unrecognized/invalid
/// - `is_present` is true ONLY if the input explicitly meant "Present"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDate {
    pub value: Option<NaiveDate>,
    pub precision: Option<DatePrecision>,
    pub is_present: bool,
}

impl NormalizedDate {
    fn unknown() -> Self {
        NormalizedDate {
            value: None,
            precision: None,
            is_present: false,
        }
    }

    fn present() -> Self {
        NormalizedDate {
            value: None,
            precision: Some(DatePrecision::Day),
            is_present: true,
        }
    }

    fn known(value: NaiveDate, precision: DatePrecision) -> Self {
        NormalizedDate {
            value: Some(value),
            precision: Some(precision),
            is_present: false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.precision.is_none()
    }
}

// ============================================================================
// PARSING
// ============================================================================

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Safely construct a date; None for impossible calendars (e.g. 02/31/2023).
fn safe_date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn parse_num(s: &str) -> Option<u32> {
    if all_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// One to two digits (month/day position).
fn md_part(s: &str) -> Option<u32> {
    if s.len() == 1 || s.len() == 2 {
        parse_num(s)
    } else {
        None
    }
}

/// Exactly four digits (year position).
fn year_part(s: &str) -> Option<i32> {
    if s.len() == 4 {
        parse_num(s).map(|y| y as i32)
    } else {
        None
    }
}

/// Normalize common intake date strings into a comparable date + precision.
///
/// Supported inputs:
///   - "Present", "Current", "Now"
///   - "YYYY-MM-DD", "YYYY/MM/DD"
///   - "YYYY-MM", "YYYY/MM", "MM/YYYY", "MM-YYYY"
///   - "YYYY"
///   - "MM/DD/YYYY"  (US-style; gated on assume_us_mdy because the intake
///     questionnaire specifies this format)
pub fn normalize_date(text: Option<&str>, assume_us_mdy: bool) -> NormalizedDate {
    let s = match text {
        Some(t) => t.trim(),
        None => return NormalizedDate::unknown(),
    };
    if s.is_empty() {
        return NormalizedDate::unknown();
    }

    let lower = s.to_lowercase();
    if lower == "present" || lower == "current" || lower == "now" {
        return NormalizedDate::present();
    }

    let sep = if s.contains('-') {
        Some('-')
    } else if s.contains('/') {
        Some('/')
    } else {
        None
    };

    let parts: Vec<&str> = match sep {
        Some(c) => s.split(c).collect(),
        // Year-only: YYYY
        None => {
            if let Some(y) = year_part(s) {
                return match safe_date(y, 1, 1) {
                    Some(dt) => NormalizedDate::known(dt, DatePrecision::Year),
                    None => NormalizedDate::unknown(),
                };
            }
            return NormalizedDate::unknown();
        }
    };

    match parts.as_slice() {
        // YYYY-MM-DD / YYYY/MM/DD (least ambiguous, checked first)
        [y, m, d] if y.len() == 4 => {
            match (year_part(y), md_part(m), md_part(d)) {
                (Some(y), Some(m), Some(d)) => match safe_date(y, m, d) {
                    Some(dt) => NormalizedDate::known(dt, DatePrecision::Day),
                    None => NormalizedDate::unknown(),
                },
                _ => NormalizedDate::unknown(),
            }
        }
        // MM/DD/YYYY (most ambiguous, US questionnaire format)
        [m, d, y] if y.len() == 4 && assume_us_mdy => {
            match (md_part(m), md_part(d), year_part(y)) {
                (Some(m), Some(d), Some(y)) => match safe_date(y, m, d) {
                    Some(dt) => NormalizedDate::known(dt, DatePrecision::Day),
                    None => NormalizedDate::unknown(),
                },
                _ => NormalizedDate::unknown(),
            }
        }
        // YYYY-MM / YYYY/MM
        [y, m] if y.len() == 4 => match (year_part(y), md_part(m)) {
            (Some(y), Some(m)) => match safe_date(y, m, 1) {
                Some(dt) => NormalizedDate::known(dt, DatePrecision::Month),
                None => NormalizedDate::unknown(),
            },
            _ => NormalizedDate::unknown(),
        },
        // MM/YYYY / MM-YYYY
        [m, y] if y.len() == 4 => match (md_part(m), year_part(y)) {
            (Some(m), Some(y)) => match safe_date(y, m, 1) {
                Some(dt) => NormalizedDate::known(dt, DatePrecision::Month),
                None => NormalizedDate::unknown(),
            },
            _ => NormalizedDate::unknown(),
        },
        _ => NormalizedDate::unknown(),
    }
}

/// Convert an end date to something comparable for overlap/gap checks.
/// 'Present' maps to today (or the supplied anchor); unknown stays None.
pub fn end_date_or_today(nd: &NormalizedDate, today: Option<NaiveDate>) -> Option<NaiveDate> {
    if nd.is_present {
        return Some(today.unwrap_or_else(|| chrono::Utc::now().date_naive()));
    }
    nd.value
}

// ============================================================================
// TESTS
// ============================================================================
