// 📦 Attorney Review Packet - machine-friendly JSON export
// Pure presentation over a finished BuildResult: window meta, marriage
// anchor, clean timelines, joint residency + travel summaries, and issues
// grouped three ways (severity / category / ref_id) with the raw snapshot
// attached wherever a ref_id resolves. No new validation happens here.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::glue::RawSnapshot;
use crate::issues::{Issue, Severity};
use crate::pipeline::BuildResult;

fn issue_to_value(issue: &Issue, snap_by_id: &BTreeMap<&str, &RawSnapshot>) -> Value {
    let snapshot = issue
        .ref_id
        .as_deref()
        .and_then(|id| snap_by_id.get(id))
        .map_or(Value::Null, |s| json!(s));

    json!({
        "severity": issue.severity,
        "category": &issue.category,
        "ref_id": &issue.ref_id,
        "message": &issue.message,
        "suggested_question": &issue.suggested_question,
        "raw_snapshot": snapshot,
    })
}

/// High > medium > low, original order preserved within a tier.
fn top_issues<'a>(issues: &'a [Issue], n: usize) -> Vec<&'a Issue> {
    let mut sorted: Vec<&Issue> = issues.iter().collect();
    sorted.sort_by_key(|i| i.severity.priority());
    sorted.truncate(n);
    sorted
}

fn by_severity(issues: &[Issue], severity: Severity) -> Vec<&Issue> {
    issues.iter().filter(|i| i.severity == severity).collect()
}

pub fn build_attorney_review_packet(result: &BuildResult) -> Value {
    let snap_by_id: BTreeMap<&str, &RawSnapshot> = result
        .snapshots
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();

    let high = by_severity(&result.issues, Severity::High);
    let medium = by_severity(&result.issues, Severity::Medium);
    let low = by_severity(&result.issues, Severity::Low);

    // BTreeMap keeps grouping keys in a stable order across runs
    let mut by_category: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    let mut by_ref: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for issue in &result.issues {
        by_category
            .entry(issue.category.as_str())
            .or_default()
            .push(issue_to_value(issue, &snap_by_id));
        by_ref
            .entry(issue.ref_id.as_deref().unwrap_or("unlinked"))
            .or_default()
            .push(issue_to_value(issue, &snap_by_id));
    }
    let group_map = |groups: BTreeMap<&str, Vec<Value>>| {
        Value::Object(
            groups
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::Array(v)))
                .collect::<Map<String, Value>>(),
        )
    };

    let top: Vec<Value> = top_issues(&result.issues, 3)
        .iter()
        .map(|i| {
            json!({
                "severity": i.severity,
                "category": &i.category,
                "ref_id": &i.ref_id,
                "message": &i.message,
                "suggested_question": &i.suggested_question,
            })
        })
        .collect();

    let beneficiary = &result.case.beneficiary;
    let petitioner = &result.case.petitioner;
    let travel = &result.beneficiary_travel;

    json!({
        "meta": {
            "packet_id": Uuid::new_v4().to_string(),
            "generated_at": Utc::now().to_rfc3339(),
            "window_start": result.window_start,
            "window_end": result.window_end,
        },
        "case": {
            "marriage": {
                "date": result.case.marriage_date,
                "city": &result.case.marriage_city,
                "state_province": &result.case.marriage_state_province,
                "country": &result.case.marriage_country,
            }
        },
        "timelines": {
            "beneficiary": {
                "addresses_lived": &beneficiary.addresses_lived,
                "employment": &beneficiary.employment,
                "travel": &beneficiary.travel_entries,
            },
            "petitioner": {
                "addresses_lived": &petitioner.addresses_lived,
                "employment": &petitioner.employment,
                "travel": &petitioner.travel_entries,
            },
        },
        "joint_residency": {
            "first_shared_date": result.joint_residency.first_shared_date,
            "match_type": result.joint_residency.match_type,
            "windows": &result.joint_residency.windows,
        },
        "travel": {
            "intervals": &travel.intervals,
            "last_event_type": travel.last_event_type,
            "last_event_date": travel.last_event_date,
            "inferred_in_us": travel.inferred_in_us,
        },
        "issues": {
            "summary": {
                "total": result.issues.len(),
                "counts_by_severity": {
                    "high": high.len(),
                    "medium": medium.len(),
                    "low": low.len(),
                },
                "top_items": top,
            },
            "counts": {
                "high": high.len(),
                "medium": medium.len(),
                "low": low.len(),
                "total": result.issues.len(),
            },
            "by_severity": {
                "high": high.iter().map(|i| issue_to_value(i, &snap_by_id)).collect::<Vec<_>>(),
                "medium": medium.iter().map(|i| issue_to_value(i, &snap_by_id)).collect::<Vec<_>>(),
                "low": low.iter().map(|i| issue_to_value(i, &snap_by_id)).collect::<Vec<_>>(),
            },
            "by_category": group_map(by_category),
            "by_ref_id": group_map(by_ref),
        },
        // Flat list too (useful for UI/debug)
        "raw_snapshots": &result.snapshots,
    })
}

// ============================================================================
// TESTS
// ============================================================================
