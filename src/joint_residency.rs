// 💍 Joint Residence Matcher - earliest shared residential window
// Cross-references the petitioner's and beneficiary's residence timelines
// for overlapping stays at a matching address (strict or loose identity).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::canonicalize::address_keys;
use crate::interval::{to_interval, AnalysisWindow};
use crate::issues::{Issue, Severity};
use crate::models::{AddressEntry, AddressType, ImmigrationCase};

// ============================================================================
// MATCH TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Unit and ZIP5 agree as well (strongest evidence)
    Strict,
    /// Street/city/state/country agree; unit or ZIP differ or are missing
    Loose,
}

impl MatchType {
    /// Sort key: strict windows win ties on start date.
    fn priority(&self) -> u8 {
        match self {
            MatchType::Strict => 0,
            MatchType::Loose => 1,
        }
    }
}

/// One person's clamped residence interval with precomputed identity keys.
#[derive(Debug, Clone)]
struct AddressRange {
    start: NaiveDate,
    end: NaiveDate,
    entry: AddressEntry,
    strict_key: String,
    loose_key: String,
}

/// A time window where both persons occupied a matching address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedResidenceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub match_type: MatchType,
    pub petitioner_entry: AddressEntry,
    pub beneficiary_entry: AddressEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointResidencyResult {
    pub first_shared_date: Option<NaiveDate>,
    pub match_type: Option<MatchType>,
    pub windows: Vec<SharedResidenceWindow>,
    pub issues: Vec<Issue>,
}

// ============================================================================
// RANGE CONSTRUCTION
// ============================================================================

fn build_ranges(addresses: &[AddressEntry], window: &AnalysisWindow) -> Vec<AddressRange> {
    let mut ranges: Vec<AddressRange> = Vec::new();

    for entry in addresses {
        // Only "lived" entries establish residence
        if entry.address_type != AddressType::Lived {
            continue;
        }

        // Shared clamping rules; entries fully outside the window drop out
        let iv = match to_interval(entry, window) {
            Some(iv) => iv,
            None => continue,
        };

        let keys = address_keys(&entry.address);
        ranges.push(AddressRange {
            start: iv.start,
            end: iv.end,
            entry: entry.clone(),
            strict_key: keys.strict_key,
            loose_key: keys.loose_key,
        });
    }

    ranges.sort_by_key(|r| (r.start, r.end));
    ranges
}

fn overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if start <= end {
        Some((start, end))
    } else {
        None
    }
}

// ============================================================================
// MATCHER
// ============================================================================

/// Find the earliest shared residential window between petitioner and
/// beneficiary.
///
/// Matching strategy:
///   1) STRICT match (unit + ZIP5 + normalized state/country agree)
///   2) LOOSE match (street + city + state + country; ignores unit + zip)
///
/// Full cross-product over both persons' intervals - per-case timelines are
/// tens of entries, so brute force beats any indexing scheme here.
///
/// Issue policy:
///   - no shared window at all -> one medium (living arrangement question)
///   - windows exist but none strict -> one medium (near-match confirmation)
///   - any strict window -> no extra issue
pub fn detect_joint_residency_start(
    case: &ImmigrationCase,
    window: &AnalysisWindow,
) -> JointResidencyResult {
    let pet_ranges = build_ranges(&case.petitioner.addresses_lived, window);
    let ben_ranges = build_ranges(&case.beneficiary.addresses_lived, window);

    let mut windows: Vec<SharedResidenceWindow> = Vec::new();

    for pr in &pet_ranges {
        for br in &ben_ranges {
            let (start, end) = match overlap(pr.start, pr.end, br.start, br.end) {
                Some(ov) => ov,
                None => continue,
            };

            let match_type = if pr.strict_key == br.strict_key {
                MatchType::Strict
            } else if pr.loose_key == br.loose_key {
                MatchType::Loose
            } else {
                continue;
            };

            windows.push(SharedResidenceWindow {
                start,
                end,
                match_type,
                petitioner_entry: pr.entry.clone(),
                beneficiary_entry: br.entry.clone(),
            });
        }
    }

    if windows.is_empty() {
        let issues = vec![Issue::new(
            Severity::Medium,
            "joint_residency",
            "No shared residential address overlap was detected between petitioner and beneficiary in the selected window.",
        )
        .with_question(format!(
            "Have you and your spouse lived together at any point between {} and {}? \
             If yes, please provide the shared address and dates. If not, briefly explain your living arrangement.",
            window.start, window.end
        ))
        .with_ref("joint_residency")];

        return JointResidencyResult {
            first_shared_date: None,
            match_type: None,
            windows: Vec::new(),
            issues,
        };
    }

    // Earliest start wins; strict beats loose on equal starts
    windows.sort_by_key(|w| (w.start, w.match_type.priority(), w.end));
    let first = &windows[0];

    let mut issues = Vec::new();

    let has_strict = windows.iter().any(|w| w.match_type == MatchType::Strict);
    if !has_strict {
        issues.push(
            Issue::new(
                Severity::Medium,
                "joint_residency",
                "A possible shared residence was detected, but only via loose address matching \
                 (unit/ZIP differences may exist).",
            )
            .with_question(
                "Please confirm your shared residence address details (unit/apartment and ZIP). \
                 If you lived together, which exact address should be used on the forms?",
            )
            .with_ref("joint_residency"),
        );
    }

    JointResidencyResult {
        first_shared_date: Some(first.start),
        match_type: Some(first.match_type),
        windows,
        issues,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatePrecision, PersonData, PostalAddress};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn addr(street: &str, unit_type: Option<&str>, unit_number: Option<&str>) -> PostalAddress {
        PostalAddress {
            street_name: street.to_string(),
            unit_type: unit_type.map(String::from),
            unit_number: unit_number.map(String::from),
            city: "Charlotte".to_string(),
            state_province: Some("NC".to_string()),
            zip_code: Some("28277".to_string()),
            country: "USA".to_string(),
        }
    }

    fn lived(address: PostalAddress, from: NaiveDate, to: Option<NaiveDate>) -> AddressEntry {
        AddressEntry {
            address,
            date_from: from,
            from_precision: DatePrecision::Day,
            date_to: to,
            to_precision: DatePrecision::Day,
            address_type: AddressType::Lived,
            notes: None,
        }
    }

    fn case_with(pet: Vec<AddressEntry>, ben: Vec<AddressEntry>) -> ImmigrationCase {
        ImmigrationCase {
            petitioner: PersonData {
                addresses_lived: pet,
                ..Default::default()
            },
            beneficiary: PersonData {
                addresses_lived: ben,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_strict_match_no_issues() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let case = case_with(
            vec![lived(
                addr("1518 Asterwind Dr", Some("Apt"), Some("2A")),
                d(2022, 6, 1),
                Some(d(2022, 9, 30)),
            )],
            vec![lived(
                addr("1518 Asterwind Dr", Some("Apt"), Some("2A")),
                d(2022, 7, 1),
                Some(d(2022, 12, 31)),
            )],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, Some(d(2022, 7, 1)));
        assert_eq!(r.match_type, Some(MatchType::Strict));
        assert!(r.issues.is_empty());
        assert_eq!(r.windows.len(), 1);
        assert_eq!(r.windows[0].end, d(2022, 9, 30));
    }

    #[test]
    fn test_loose_only_match_adds_medium_issue() {
        // Same street, differing unit type: strict fails, loose holds
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let case = case_with(
            vec![lived(
                addr("1518 Asterwind Dr", Some("Apt"), Some("2A")),
                d(2022, 6, 1),
                Some(d(2022, 9, 30)),
            )],
            vec![lived(
                addr("1518 Asterwind Dr", Some("Unit"), Some("2a")),
                d(2022, 7, 1),
                Some(d(2022, 12, 31)),
            )],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, Some(d(2022, 7, 1)));
        assert_eq!(r.match_type, Some(MatchType::Loose));
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].severity, Severity::Medium);
        assert_eq!(r.issues[0].category, "joint_residency");
    }

    #[test]
    fn test_no_shared_residence_single_medium_issue() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let case = case_with(
            vec![lived(
                addr("111 First St", Some("Apt"), Some("1A")),
                d(2022, 1, 1),
                Some(d(2022, 3, 31)),
            )],
            vec![lived(
                addr("999 Ninth St", Some("Apt"), Some("9Z")),
                d(2022, 1, 1),
                Some(d(2022, 3, 31)),
            )],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, None);
        assert_eq!(r.match_type, None);
        assert!(r.windows.is_empty());
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].severity, Severity::Medium);
        assert_eq!(r.issues[0].ref_id.as_deref(), Some("joint_residency"));
    }

    #[test]
    fn test_date_overlap_required_even_for_same_address() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let shared = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"));
        let case = case_with(
            vec![lived(shared.clone(), d(2022, 1, 1), Some(d(2022, 3, 31)))],
            vec![lived(shared, d(2022, 6, 1), Some(d(2022, 9, 30)))],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, None);
        assert_eq!(r.issues.len(), 1);
    }

    #[test]
    fn test_strict_preferred_over_loose_on_same_start() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let strict_addr = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"));
        let loose_addr = addr("1518 Asterwind Dr", Some("Unit"), Some("2A"));

        // Beneficiary has two entries at the same street from the same date;
        // one matches strictly, one only loosely.
        let case = case_with(
            vec![lived(strict_addr.clone(), d(2022, 7, 1), Some(d(2022, 12, 31)))],
            vec![
                lived(loose_addr, d(2022, 7, 1), Some(d(2022, 12, 31))),
                lived(strict_addr, d(2022, 7, 1), Some(d(2022, 12, 31))),
            ],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.match_type, Some(MatchType::Strict));
        assert_eq!(r.windows.len(), 2);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_non_lived_entries_ignored() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let shared = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"));

        let mut mailing = lived(shared.clone(), d(2022, 7, 1), Some(d(2022, 12, 31)));
        mailing.address_type = AddressType::Mailing;

        let case = case_with(
            vec![lived(shared, d(2022, 7, 1), Some(d(2022, 12, 31)))],
            vec![mailing],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, None);
    }

    #[test]
    fn test_open_ended_entries_share_through_window_end() {
        let window = AnalysisWindow::new(d(2022, 1, 1), d(2022, 12, 31));
        let shared = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"));
        let case = case_with(
            vec![lived(shared.clone(), d(2022, 6, 1), None)],
            vec![lived(shared, d(2022, 7, 1), None)],
        );

        let r = detect_joint_residency_start(&case, &window);
        assert_eq!(r.first_shared_date, Some(d(2022, 7, 1)));
        assert_eq!(r.windows[0].end, d(2022, 12, 31));
    }
}
