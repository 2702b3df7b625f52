// 📊 Coverage Analyzer - gap and overlap detection over one timeline
// Address and employment continuity checks are the same sweep; only the
// message wording, the category tag, and the one-day-gap policy differ,
// so both run through a single routine parameterized by CoverageProfile.

use chrono::NaiveDate;

use crate::interval::{build_intervals, days_inclusive, next_day, prev_day, AnalysisWindow};
use crate::issues::{Issue, Severity};
use crate::models::{AddressEntry, EmploymentEntry, TimelineEntry};

// ============================================================================
// COVERAGE PROFILE
// ============================================================================

/// Category-specific wording and policy for the generic coverage sweep.
pub struct CoverageProfile {
    /// Issue category tag ("address_history" / "employment")
    pub category: &'static str,

    /// Capitalized noun for message leads ("Address" / "Employment")
    pub label: &'static str,

    /// Lowercase noun for mid-sentence use
    pub noun: &'static str,

    pub empty_message: &'static str,
    pub empty_question: &'static str,
    pub none_in_window_message: &'static str,
    pub none_in_window_question: &'static str,

    /// Severity of an interior gap of exactly one day.
    /// USCIS address continuity is strict (high); a one-day employment gap
    /// between jobs is routine (medium).
    pub one_day_gap_severity: Severity,

    pub gap_question: fn(NaiveDate, NaiveDate) -> String,
    pub overlap_question: &'static str,
}

fn address_gap_question(from: NaiveDate, to: NaiveDate) -> String {
    format!("Where did you live from {} to {}?", from, to)
}

fn employment_gap_question(from: NaiveDate, to: NaiveDate) -> String {
    format!("What was your employment status from {} to {}?", from, to)
}

impl CoverageProfile {
    pub fn address() -> Self {
        CoverageProfile {
            category: "address_history",
            label: "Address",
            noun: "address",
            empty_message: "No residential addresses provided for the selected window.",
            empty_question: "Please provide your residential address history for the required period.",
            none_in_window_message: "No residential addresses overlap the required window.",
            none_in_window_question: "Please confirm your residential address history for the required period.",
            one_day_gap_severity: Severity::High,
            gap_question: address_gap_question,
            overlap_question: "Please confirm the exact move-in/move-out dates for the overlapping addresses.",
        }
    }

    pub fn employment() -> Self {
        CoverageProfile {
            category: "employment",
            label: "Employment",
            noun: "employment",
            empty_message: "No employment history provided for the selected window.",
            empty_question: "Please provide your employment history (including unemployment periods) for the required period.",
            none_in_window_message: "No employment entries overlap the required window.",
            none_in_window_question: "Please confirm your employment history for the required period.",
            one_day_gap_severity: Severity::Medium,
            gap_question: employment_gap_question,
            overlap_question: "Please confirm whether you held both positions simultaneously during this period.",
        }
    }
}

// ============================================================================
// GAP DETECTION
// ============================================================================

/// Precision-aware gap detection for one timeline category.
///
/// Each entry covers a RANGE (earliest possible start through latest possible
/// end per its precisions; open end means "Present" through window end).
/// A gap exists when prev_end + 1 day < next_start. The running covered-
/// through mark always advances to max(current, entry end), so nested and
/// overlapping entries never produce spurious gaps.
pub fn detect_gaps<E: TimelineEntry>(
    entries: &[E],
    window: &AnalysisWindow,
    profile: &CoverageProfile,
) -> Vec<Issue> {
    if entries.is_empty() {
        return vec![Issue::new(Severity::High, profile.category, profile.empty_message)
            .with_question(profile.empty_question)];
    }

    let intervals = build_intervals(entries, window);
    if intervals.is_empty() {
        return vec![
            Issue::new(Severity::High, profile.category, profile.none_in_window_message)
                .with_question(profile.none_in_window_question),
        ];
    }

    let mut issues = Vec::new();

    // Start gap: any uncovered lead-in is high, regardless of length
    let first_start = intervals[0].start;
    if first_start > window.start {
        let gap_from = window.start;
        let gap_to = prev_day(first_start);
        issues.push(
            Issue::new(
                Severity::High,
                profile.category,
                format!(
                    "{} gap at the start of the window: {} to {}.",
                    profile.label, gap_from, gap_to
                ),
            )
            .with_question((profile.gap_question)(gap_from, gap_to)),
        );
    }

    // Middle gaps
    let mut covered_through = intervals[0].end;
    for iv in &intervals[1..] {
        if next_day(covered_through) < iv.start {
            let gap_from = next_day(covered_through);
            let gap_to = prev_day(iv.start);
            let gap_days = days_inclusive(gap_from, gap_to);

            let severity = if gap_days == 1 {
                profile.one_day_gap_severity
            } else {
                Severity::High
            };

            issues.push(
                Issue::new(
                    severity,
                    profile.category,
                    format!(
                        "Unexplained {} gap of {} day(s): {} to {}.",
                        profile.noun, gap_days, gap_from, gap_to
                    ),
                )
                .with_question((profile.gap_question)(gap_from, gap_to)),
            );
        }

        covered_through = covered_through.max(iv.end);
    }

    // End gap: uncovered tail is high, regardless of length
    if covered_through < window.end {
        let gap_from = next_day(covered_through);
        let gap_to = window.end;
        issues.push(
            Issue::new(
                Severity::High,
                profile.category,
                format!(
                    "{} gap at the end of the window: {} to {}.",
                    profile.label, gap_from, gap_to
                ),
            )
            .with_question((profile.gap_question)(gap_from, gap_to)),
        );
    }

    issues
}

// ============================================================================
// OVERLAP DETECTION
// ============================================================================

/// Double-coverage detection over the same sorted intervals.
///
/// Severity by overlapping day count: 1 day = low, 2-29 = medium, 30+ = high.
/// Dual jobs are common, so employment uses the identical lenient tiers;
/// an empty entry list is only an issue for gap detection, never here.
pub fn detect_overlaps<E: TimelineEntry>(
    entries: &[E],
    window: &AnalysisWindow,
    profile: &CoverageProfile,
) -> Vec<Issue> {
    let intervals = build_intervals(entries, window);
    if intervals.len() < 2 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let mut covered_through = intervals[0].end;

    for iv in &intervals[1..] {
        if iv.start <= covered_through {
            let overlap_from = iv.start;
            let overlap_to = covered_through.min(iv.end);
            let overlap_days = days_inclusive(overlap_from, overlap_to);

            let severity = if overlap_days >= 30 {
                Severity::High
            } else if overlap_days >= 2 {
                Severity::Medium
            } else {
                Severity::Low
            };

            issues.push(
                Issue::new(
                    severity,
                    profile.category,
                    format!(
                        "Overlapping {} entries: {} to {} ({} day(s) of double coverage).",
                        profile.noun, overlap_from, overlap_to, overlap_days
                    ),
                )
                .with_question(profile.overlap_question),
            );
        }

        covered_through = covered_through.max(iv.end);
    }

    issues
}

// ============================================================================
// PUBLIC WRAPPERS
// ============================================================================

pub fn detect_address_gaps(addresses: &[AddressEntry], window: &AnalysisWindow) -> Vec<Issue> {
    detect_gaps(addresses, window, &CoverageProfile::address())
}

pub fn detect_address_overlaps(addresses: &[AddressEntry], window: &AnalysisWindow) -> Vec<Issue> {
    detect_overlaps(addresses, window, &CoverageProfile::address())
}

pub fn detect_employment_gaps(employment: &[EmploymentEntry], window: &AnalysisWindow) -> Vec<Issue> {
    detect_gaps(employment, window, &CoverageProfile::employment())
}

pub fn detect_employment_overlaps(
    employment: &[EmploymentEntry],
    window: &AnalysisWindow,
) -> Vec<Issue> {
    detect_overlaps(employment, window, &CoverageProfile::employment())
}

// ============================================================================
// TESTS
// ============================================================================
