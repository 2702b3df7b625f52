// 🏗️ Case Pipeline - raw intake JSON to a fully analyzed case
// Orchestrates glue parsing, coverage checks, joint residency matching and
// travel analysis into a single BuildResult the packet builder consumes.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coverage::{
    detect_address_gaps, detect_address_overlaps, detect_employment_gaps,
    detect_employment_overlaps,
};
use crate::glue::{
    parse_address_list, parse_employment_list, parse_travel_list, require_date, RawSnapshot,
};
use crate::interval::AnalysisWindow;
use crate::issues::{tag_issues, Issue};
use crate::joint_residency::{detect_joint_residency_start, JointResidencyResult};
use crate::models::{ImmigrationCase, PersonData};
use crate::travel::{TravelAnalysisResult, TravelAnalyzer};

// ============================================================================
// BUILD RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResult {
    pub case: ImmigrationCase,
    pub issues: Vec<Issue>,
    pub snapshots: Vec<RawSnapshot>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub joint_residency: JointResidencyResult,
    pub beneficiary_travel: TravelAnalysisResult,
}

// ============================================================================
// PIPELINE
// ============================================================================

fn raw_list<'a>(raw_person: &'a Value, key: &str) -> &'a [Value] {
    raw_person
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

pub struct CasePipeline {
    /// Treat M/D/Y date strings as US-style (intake questionnaire format)
    pub assume_us_mdy: bool,

    /// Also run coverage checks on the petitioner's timelines
    pub validate_petitioner: bool,

    /// Lookback window length. Naive 5*365 days; relative-year calendar
    /// math can replace this once the heuristics need it.
    pub window_days: i64,
}

impl CasePipeline {
    pub fn new() -> Self {
        CasePipeline {
            assume_us_mdy: true,
            validate_petitioner: false,
            window_days: 5 * 365,
        }
    }

    pub fn with_petitioner_validation(mut self, enabled: bool) -> Self {
        self.validate_petitioner = enabled;
        self
    }

    fn window(&self, today: Option<NaiveDate>) -> AnalysisWindow {
        let end = today.unwrap_or_else(|| Utc::now().date_naive());
        AnalysisWindow::new(end - Duration::days(self.window_days), end)
    }

    fn build_person(
        &self,
        raw_person: &Value,
        prefix: &str,
        issues: &mut Vec<Issue>,
        snapshots: &mut Vec<RawSnapshot>,
    ) -> PersonData {
        let (addresses, addr_issues, addr_snaps) = parse_address_list(
            raw_list(raw_person, "addresses"),
            self.assume_us_mdy,
            &format!("{prefix}_addr"),
        );
        issues.extend(addr_issues);
        snapshots.extend(addr_snaps);

        let (employment, emp_issues, emp_snaps) = parse_employment_list(
            raw_list(raw_person, "employment"),
            self.assume_us_mdy,
            &format!("{prefix}_emp"),
        );
        issues.extend(emp_issues);
        snapshots.extend(emp_snaps);

        let (travel, trv_issues, trv_snaps) = parse_travel_list(
            raw_list(raw_person, "travel"),
            self.assume_us_mdy,
            &format!("{prefix}_trv"),
        );
        issues.extend(trv_issues);
        snapshots.extend(trv_snaps);

        PersonData {
            addresses_lived: addresses,
            employment,
            travel_entries: travel,
            ..PersonData::default()
        }
    }

    /// Full build: parse both people and the marriage block, compute the
    /// lookback window, then run every analyzer. Coverage checks run on the
    /// beneficiary by default (typical for AOS continuity questions); the
    /// petitioner is opt-in.
    pub fn build(&self, raw: &Value, today: Option<NaiveDate>) -> BuildResult {
        let mut issues: Vec<Issue> = Vec::new();
        let mut snapshots: Vec<RawSnapshot> = Vec::new();

        let empty = Value::Object(Default::default());
        let raw_pet = raw.get("petitioner").unwrap_or(&empty);
        let raw_ben = raw.get("beneficiary").unwrap_or(&empty);

        let petitioner = self.build_person(raw_pet, "pet", &mut issues, &mut snapshots);
        let beneficiary = self.build_person(raw_ben, "ben", &mut issues, &mut snapshots);

        // Marriage block (optional)
        let marriage = raw.get("marriage").unwrap_or(&empty);
        let mut marriage_issues = Vec::new();
        let (marriage_date, _, _) = require_date(
            "marriage date",
            marriage.get("date").and_then(Value::as_str),
            self.assume_us_mdy,
            false,
            "marriage",
            &mut marriage_issues,
        );
        // Pseudo ref_id so the packet can point at the marriage block
        issues.extend(tag_issues(marriage_issues, "case_marriage"));

        let get_str = |v: &Value, key: &str| {
            v.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let case = ImmigrationCase {
            petitioner,
            beneficiary,
            marriage_date,
            marriage_city: get_str(marriage, "city"),
            marriage_state_province: get_str(marriage, "state"),
            marriage_country: get_str(marriage, "country"),
        };

        let window = self.window(today);

        issues.extend(detect_address_gaps(&case.beneficiary.addresses_lived, &window));
        issues.extend(detect_address_overlaps(&case.beneficiary.addresses_lived, &window));
        issues.extend(detect_employment_gaps(&case.beneficiary.employment, &window));
        issues.extend(detect_employment_overlaps(&case.beneficiary.employment, &window));

        if self.validate_petitioner {
            issues.extend(detect_address_gaps(&case.petitioner.addresses_lived, &window));
            issues.extend(detect_address_overlaps(&case.petitioner.addresses_lived, &window));
            issues.extend(detect_employment_gaps(&case.petitioner.employment, &window));
            issues.extend(detect_employment_overlaps(&case.petitioner.employment, &window));
        }

        let joint_residency = detect_joint_residency_start(&case, &window);
        issues.extend(joint_residency.issues.clone());

        let beneficiary_travel = TravelAnalyzer::new().analyze(
            &case.beneficiary.travel_entries,
            &window,
            Some(&case.beneficiary.employment),
        );
        issues.extend(beneficiary_travel.issues.clone());

        BuildResult {
            case,
            issues,
            snapshots,
            window_start: window.start,
            window_end: window.end,
            joint_residency,
            beneficiary_travel,
        }
    }
}

impl Default for CasePipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
