// 🚩 Issue Model - Findings for attorney review
// Every domain finding (gap, overlap, travel irregularity) is an Issue value.
// Severity is the only urgency channel - there is no separate error path.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Likely RFE-triggering inconsistency; must be resolved before filing
    High,
    /// Questionable or incomplete; needs confirmation
    Medium,
    /// Benign note for attorney awareness
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Sort key: high before medium before low
    pub fn priority(&self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ISSUE
// ============================================================================

/// A single finding paired with a human-readable follow-up question.
///
/// Issues are immutable once created; `ref_id` associates an issue with the
/// originating record and is attached by constructing a new Issue (see
/// `tag_issue`), never by mutating the finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub suggested_question: Option<String>,
    pub ref_id: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, category: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            severity,
            category: category.into(),
            message: message.into(),
            suggested_question: None,
            ref_id: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.suggested_question = Some(question.into());
        self
    }

    pub fn with_ref(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }
}

// ============================================================================
// REF-ID TAGGING
// ============================================================================

/// Tag a single Issue if it doesn't already have a ref_id.
pub fn tag_issue(issue: Issue, ref_id: &str) -> Issue {
    if issue.ref_id.is_some() {
        return issue;
    }
    Issue {
        ref_id: Some(ref_id.to_string()),
        ..issue
    }
}

/// Return a new list of Issues with ref_id populated when missing.
pub fn tag_issues(issues: Vec<Issue>, ref_id: &str) -> Vec<Issue> {
    issues.into_iter().map(|i| tag_issue(i, ref_id)).collect()
}

// ============================================================================
// TESTS
// ============================================================================
