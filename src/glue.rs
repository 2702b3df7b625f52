// 🧩 Intake Glue - raw JSON dicts to typed timeline entries
// Lenient on purpose: a bad field yields an Issue (tagged with the entry's
// ref_id) plus a raw snapshot of what the user typed, never a hard error.
// Entries missing core fields are withheld from the timelines but their
// issues and snapshots survive into the attorney packet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::issues::{tag_issues, Issue, Severity};
use crate::models::{
    AddressEntry, AddressType, DatePrecision, EmploymentEntry, EmploymentType, PostalAddress,
    TravelEntry, TravelEventType,
};
use crate::normalize::normalize_date;

// ============================================================================
// RAW SNAPSHOTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSection {
    Address,
    Employment,
    Travel,
    Person,
    Case,
}

/// What the user actually typed, kept verbatim for the attorney packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// e.g. "addr_0", "emp_2", "trv_1"
    pub id: String,
    pub section: SnapshotSection,
    pub raw: Value,
    pub notes: Option<String>,
}

impl RawSnapshot {
    fn new(id: &str, section: SnapshotSection, raw: &Value) -> Self {
        RawSnapshot {
            id: id.to_string(),
            section,
            raw: raw.clone(),
            notes: None,
        }
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn raw_str(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_us_country(country: &str) -> bool {
    matches!(
        country.trim().to_lowercase().as_str(),
        "us" | "usa" | "united states" | "united states of america"
    )
}

fn looks_like_state_code(state: &str) -> bool {
    let s = state.trim();
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

const FORMATS_WITH_PRESENT: &str =
    "YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, YYYY-MM, YYYY/MM, MM/YYYY, MM-YYYY, YYYY, or 'Present'";
const FORMATS_NO_PRESENT: &str =
    "YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, YYYY-MM, YYYY/MM, MM/YYYY, MM-YYYY, or YYYY";

pub fn require_str(
    field_label: &str,
    raw_value: Option<String>,
    category: &str,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    match raw_value {
        Some(v) => Some(v),
        None => {
            issues.push(
                Issue::new(
                    Severity::High,
                    category,
                    format!("Missing required field: {field_label}."),
                )
                .with_question(format!("Please provide {field_label}.")),
            );
            None
        }
    }
}

/// Parse one date field; unknown/invalid always produces an Issue, never
/// an error. Returns (value, precision, is_present) - value is None for
/// both unknown and 'Present' (the model stores open ends as None).
pub fn require_date(
    field_label: &str,
    raw_text: Option<&str>,
    assume_us_mdy: bool,
    allow_present: bool,
    category: &str,
    issues: &mut Vec<Issue>,
) -> (Option<NaiveDate>, DatePrecision, bool) {
    let nd = normalize_date(raw_text, assume_us_mdy);

    if nd.is_present {
        if !allow_present {
            issues.push(
                Issue::new(
                    Severity::High,
                    category,
                    format!("{field_label}: 'Present' is not allowed here."),
                )
                .with_question(format!(
                    "Please provide an actual date for {field_label} ({FORMATS_NO_PRESENT})."
                )),
            );
            return (None, DatePrecision::Day, false);
        }
        return (None, DatePrecision::Day, true);
    }

    match (nd.value, nd.precision) {
        (Some(value), Some(precision)) => (Some(value), precision, false),
        _ => {
            let raw_display = match raw_text.map(str::trim) {
                Some(t) if !t.is_empty() => format!("'{t}'"),
                _ => "(blank)".to_string(),
            };
            let formats = if allow_present {
                FORMATS_WITH_PRESENT
            } else {
                FORMATS_NO_PRESENT
            };
            issues.push(
                Issue::new(
                    Severity::High,
                    category,
                    format!("Invalid or unrecognized date for {field_label}: {raw_display}."),
                )
                .with_question(format!(
                    "Please provide a valid date for {field_label} in one of: {formats}."
                )),
            );
            (None, DatePrecision::Day, false)
        }
    }
}

// ============================================================================
// ADDRESS GLUE
// ============================================================================

/// Build a PostalAddress from a raw dict.
///
/// Required: street_name, city, country. Optional: unit_type, unit_number,
/// state_province, zip_code. US addresses with a non-2-letter state get a
/// gentle medium nudge (USCIS prefers 2-letter codes) but are kept.
pub fn parse_postal_address(raw: &Value, category: &str) -> (Option<PostalAddress>, Vec<Issue>) {
    let mut issues = Vec::new();

    let street = require_str("street_name", raw_str(raw, "street_name"), category, &mut issues);
    let city = require_str("city", raw_str(raw, "city"), category, &mut issues);
    let country = require_str("country", raw_str(raw, "country"), category, &mut issues);

    let (street, city, country) = match (street, city, country) {
        (Some(s), Some(c), Some(co)) => (s, c, co),
        _ => return (None, issues),
    };

    let unit_type = raw_str(raw, "unit_type");
    if let Some(ut) = &unit_type {
        // Kept as free text either way; the canonicalizer folds synonyms
        let known = matches!(
            ut.trim().to_lowercase().as_str(),
            "apt" | "apartment" | "unit" | "ste" | "suite" | "fl" | "floor"
        );
        if !known {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    category,
                    format!("Unrecognized unit type '{ut}'."),
                )
                .with_question(
                    "Please confirm the unit designator (e.g., Apt, Ste, Fl, Unit).",
                ),
            );
        }
    }

    let state_province = raw_str(raw, "state_province");
    if let Some(state) = &state_province {
        if is_us_country(&country) && !looks_like_state_code(state) {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    category,
                    format!(
                        "For U.S. addresses, USCIS prefers 2-letter state codes. You entered '{state}'."
                    ),
                )
                .with_question("Please confirm the state as a 2-letter code (e.g., NC, NY)."),
            );
        }
    }

    let addr = PostalAddress {
        street_name: street,
        unit_type,
        unit_number: raw_str(raw, "unit_number"),
        city,
        state_province,
        zip_code: raw_str(raw, "zip_code"),
        country,
    };
    (Some(addr), issues)
}

/// Build one AddressEntry. Invalid core fields never silently drop the
/// record: issues + snapshot always come back for attorney review.
/// Accepts either nested {"address": {...}} or a flat dict.
pub fn parse_address_entry(
    raw: &Value,
    ref_id: &str,
    assume_us_mdy: bool,
) -> (Option<AddressEntry>, Vec<Issue>, RawSnapshot) {
    let mut issues = Vec::new();
    let snapshot = RawSnapshot::new(ref_id, SnapshotSection::Address, raw);

    let addr_raw = match raw.get("address") {
        Some(nested) if nested.is_object() => nested,
        _ => raw,
    };
    let (addr, addr_issues) = parse_postal_address(addr_raw, "address_history");
    issues.extend(addr_issues);

    let (date_from, from_precision, _) = require_date(
        "address start date (date_from)",
        raw.get("date_from").and_then(Value::as_str),
        assume_us_mdy,
        false,
        "address_history",
        &mut issues,
    );

    let (date_to, to_precision, to_present) = require_date(
        "address end date (date_to)",
        raw.get("date_to").and_then(Value::as_str),
        assume_us_mdy,
        true,
        "address_history",
        &mut issues,
    );
    // 'Present' is already represented as None (open-ended)
    debug_assert!(!to_present || date_to.is_none());

    let address_type = match raw.get("address_type").and_then(Value::as_str) {
        None => AddressType::Lived,
        Some("lived") => AddressType::Lived,
        Some("temporary") => AddressType::Temporary,
        Some("mailing") => AddressType::Mailing,
        Some(other) => {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    "address_history",
                    format!("Unknown address_type '{other}'; defaulted to 'lived'."),
                )
                .with_question(
                    "Please confirm whether this was a lived/temporary/mailing address.",
                ),
            );
            AddressType::Lived
        }
    };

    let (addr, date_from) = match (addr, date_from) {
        (Some(a), Some(d)) => (a, d),
        _ => return (None, tag_issues(issues, ref_id), snapshot),
    };

    let entry = AddressEntry {
        address: addr,
        date_from,
        from_precision,
        date_to,
        to_precision,
        address_type,
        notes: raw_str(raw, "notes"),
    };
    (Some(entry), tag_issues(issues, ref_id), snapshot)
}

pub fn parse_address_list(
    raw_list: &[Value],
    assume_us_mdy: bool,
    id_prefix: &str,
) -> (Vec<AddressEntry>, Vec<Issue>, Vec<RawSnapshot>) {
    let mut entries = Vec::new();
    let mut issues = Vec::new();
    let mut snapshots = Vec::new();

    for (idx, raw) in raw_list.iter().enumerate() {
        let ref_id = format!("{id_prefix}_{idx}");
        let (entry, entry_issues, snap) = parse_address_entry(raw, &ref_id, assume_us_mdy);
        snapshots.push(snap);
        issues.extend(entry_issues);
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    (entries, issues, snapshots)
}

// ============================================================================
// EMPLOYMENT GLUE
// ============================================================================

pub fn parse_employment_entry(
    raw: &Value,
    ref_id: &str,
    assume_us_mdy: bool,
) -> (Option<EmploymentEntry>, Vec<Issue>, RawSnapshot) {
    let mut issues = Vec::new();
    let snapshot = RawSnapshot::new(ref_id, SnapshotSection::Employment, raw);

    let employer = require_str("employer", raw_str(raw, "employer"), "employment", &mut issues);

    let (date_from, from_precision, _) = require_date(
        "employment start date (date_from)",
        raw.get("date_from").and_then(Value::as_str),
        assume_us_mdy,
        false,
        "employment",
        &mut issues,
    );

    let (date_to, to_precision, _) = require_date(
        "employment end date (date_to)",
        raw.get("date_to").and_then(Value::as_str),
        assume_us_mdy,
        true,
        "employment",
        &mut issues,
    );

    let employment_type = match raw.get("employment_type").and_then(Value::as_str) {
        Some("employed") => EmploymentType::Employed,
        Some("self_employed") => EmploymentType::SelfEmployed,
        Some("unemployed") => EmploymentType::Unemployed,
        other => {
            let display = other.unwrap_or("(missing)");
            issues.push(
                Issue::new(
                    Severity::Medium,
                    "employment",
                    format!("Unknown employment_type '{display}'; defaulted to 'employed'."),
                )
                .with_question(
                    "Please confirm employment type: employed, self_employed, or unemployed.",
                ),
            );
            EmploymentType::Employed
        }
    };

    let employer_address = match raw.get("employer_address") {
        Some(addr_raw) if addr_raw.is_object() => {
            let (addr, addr_issues) = parse_postal_address(addr_raw, "employment");
            issues.extend(addr_issues);
            addr
        }
        _ => None,
    };

    let (employer, date_from) = match (employer, date_from) {
        (Some(e), Some(d)) => (e, d),
        _ => return (None, tag_issues(issues, ref_id), snapshot),
    };

    let entry = EmploymentEntry {
        employer,
        role: raw_str(raw, "role"),
        employer_address,
        date_from,
        from_precision,
        date_to,
        to_precision,
        employment_type,
        notes: raw_str(raw, "notes"),
    };
    (Some(entry), tag_issues(issues, ref_id), snapshot)
}

pub fn parse_employment_list(
    raw_list: &[Value],
    assume_us_mdy: bool,
    id_prefix: &str,
) -> (Vec<EmploymentEntry>, Vec<Issue>, Vec<RawSnapshot>) {
    let mut entries = Vec::new();
    let mut issues = Vec::new();
    let mut snapshots = Vec::new();

    for (idx, raw) in raw_list.iter().enumerate() {
        let ref_id = format!("{id_prefix}_{idx}");
        let (entry, entry_issues, snap) = parse_employment_entry(raw, &ref_id, assume_us_mdy);
        snapshots.push(snap);
        issues.extend(entry_issues);
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    (entries, issues, snapshots)
}

// ============================================================================
// TRAVEL GLUE
// ============================================================================

pub fn parse_travel_entry(
    raw: &Value,
    ref_id: &str,
    assume_us_mdy: bool,
) -> (Option<TravelEntry>, Vec<Issue>, RawSnapshot) {
    let mut issues = Vec::new();
    let snapshot = RawSnapshot::new(ref_id, SnapshotSection::Travel, raw);

    let event_type = match raw.get("event_type").and_then(Value::as_str) {
        Some("entry") => Some(TravelEventType::Entry),
        Some("exit") => Some(TravelEventType::Exit),
        other => {
            let display = other.unwrap_or("(missing)");
            issues.push(
                Issue::new(
                    Severity::High,
                    "travel",
                    format!("Missing/invalid travel event_type '{display}'."),
                )
                .with_question("Please specify travel event type: entry or exit."),
            );
            None
        }
    };

    // 'Present' is not valid for a discrete travel event
    let (date, _, _) = require_date(
        "travel event date",
        raw.get("date").and_then(Value::as_str),
        assume_us_mdy,
        false,
        "travel",
        &mut issues,
    );

    let (event_type, date) = match (event_type, date) {
        (Some(t), Some(d)) => (t, d),
        _ => return (None, tag_issues(issues, ref_id), snapshot),
    };

    let entry = TravelEntry {
        event_type,
        date,
        port_or_city: raw_str(raw, "port_or_city"),
        status_or_class: raw_str(raw, "status_or_class"),
        i94_number: raw_str(raw, "i94_number"),
        inspected: raw.get("inspected").and_then(Value::as_bool),
        notes: raw_str(raw, "notes"),
    };
    (Some(entry), tag_issues(issues, ref_id), snapshot)
}

pub fn parse_travel_list(
    raw_list: &[Value],
    assume_us_mdy: bool,
    id_prefix: &str,
) -> (Vec<TravelEntry>, Vec<Issue>, Vec<RawSnapshot>) {
    let mut entries = Vec::new();
    let mut issues = Vec::new();
    let mut snapshots = Vec::new();

    for (idx, raw) in raw_list.iter().enumerate() {
        let ref_id = format!("{id_prefix}_{idx}");
        let (entry, entry_issues, snap) = parse_travel_entry(raw, &ref_id, assume_us_mdy);
        snapshots.push(snap);
        issues.extend(entry_issues);
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    (entries, issues, snapshots)
}

// ============================================================================
// TESTS
// ============================================================================
