// Case Continuity Engine - Core Library
// Exposes all modules for use in the CLI and tests

pub mod models;
pub mod issues;
pub mod normalize;
pub mod canonicalize;
pub mod interval;
pub mod coverage;        // Gap/overlap analysis over one timeline
pub mod joint_residency; // Cross-person shared residence matching
pub mod travel;          // Exit/entry pairing + AOS-oriented flags
pub mod glue;            // Raw intake JSON -> typed entries
pub mod pipeline;        // End-to-end case build
pub mod packet;          // Attorney review packet export

// Re-export commonly used types
pub use models::{
    AddressEntry, AddressType, DatePrecision, EmploymentEntry, EmploymentType,
    ImmigrationCase, PersonData, PersonName, PostalAddress, RelatedAddress, RelatedPurpose,
    TimelineEntry, TravelEntry, TravelEventType,
};
pub use issues::{tag_issue, tag_issues, Issue, Severity};
pub use normalize::{end_date_or_today, normalize_date, NormalizedDate};
pub use canonicalize::{address_keys, compare_addresses, AddressKeys};
pub use interval::{build_intervals, to_interval, AnalysisWindow, Interval};
pub use coverage::{
    detect_address_gaps, detect_address_overlaps, detect_employment_gaps,
    detect_employment_overlaps, detect_gaps, detect_overlaps, CoverageProfile,
};
pub use joint_residency::{
    detect_joint_residency_start, JointResidencyResult, MatchType, SharedResidenceWindow,
};
pub use travel::{TravelAnalysisResult, TravelAnalyzer, TravelInterval};
pub use glue::{
    parse_address_list, parse_employment_list, parse_travel_list, RawSnapshot, SnapshotSection,
};
pub use pipeline::{BuildResult, CasePipeline};
pub use packet::build_attorney_review_packet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
