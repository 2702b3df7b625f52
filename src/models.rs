// 📋 Case Model - Typed records for a marriage-based AOS case
// Petitioner and beneficiary each carry three timelines: residence,
// employment, and cross-border travel. date_to=None always means "Present".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONTROLLED SETS (USCIS-aligned)
// ============================================================================

/// Granularity at which a reported date is known.
/// Drives how much of the calendar a recorded date is assumed to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Lived,
    Temporary,
    Mailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Employed,
    SelfEmployed,
    Unemployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelEventType {
    Entry,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedPurpose {
    EmployerLocation,
    RelativeHome,
    UsedOnApplication,
    Mailing,
    Other,
}

// ============================================================================
// NAME MODEL
// ============================================================================

/// USCIS-aligned name structure.
/// USCIS always separates First / Middle / Last.
/// For cultures with two last names, both go in last_name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,

    /// Aliases, maiden names, alternate spellings, etc.
    #[serde(default)]
    pub other_names_used: Vec<String>,
}

// ============================================================================
// POSTAL ADDRESS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street_name: String,

    /// Apt / Ste / Fl / Unit (free text; canonicalizer folds synonyms)
    pub unit_type: Option<String>,
    pub unit_number: Option<String>,

    pub city: String,
    pub state_province: Option<String>,
    pub zip_code: Option<String>,
    pub country: String,
}

// ============================================================================
// TIMELINE ENTRIES
// ============================================================================

/// Residential address history entry. date_to=None means "Present".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub address: PostalAddress,
    pub date_from: NaiveDate,
    pub from_precision: DatePrecision,
    pub date_to: Option<NaiveDate>,
    pub to_precision: DatePrecision,
    pub address_type: AddressType,
    pub notes: Option<String>,
}

/// Addresses relevant to the case but not part of the residential timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedAddress {
    pub address: PostalAddress,
    pub purpose: RelatedPurpose,
    pub related_to: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentEntry {
    pub employer: String,
    pub role: Option<String>,
    pub employer_address: Option<PostalAddress>,

    pub date_from: NaiveDate,
    pub from_precision: DatePrecision,
    pub date_to: Option<NaiveDate>,
    pub to_precision: DatePrecision,
    pub employment_type: EmploymentType,
    pub notes: Option<String>,
}

/// A single border-crossing event (discrete date, always day precision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEntry {
    pub event_type: TravelEventType,
    pub date: NaiveDate,
    pub port_or_city: Option<String>,

    /// Class of admission on entry (e.g., B2, F1, H1B, parole)
    pub status_or_class: Option<String>,
    pub i94_number: Option<String>,

    /// Whether the person was inspected/admitted/paroled.
    /// None = not asked/unknown, Some(false) = explicitly not inspected.
    pub inspected: Option<bool>,
    pub notes: Option<String>,
}

// ============================================================================
// TIMELINE SEAM
// ============================================================================

/// Uniform access to the precision-limited date range of a timeline record.
/// The interval model (src/interval.rs) consumes entries only through this
/// trait, so residence and employment share one set of rounding rules.
pub trait TimelineEntry {
    fn date_from(&self) -> NaiveDate;
    fn from_precision(&self) -> DatePrecision;
    fn date_to(&self) -> Option<NaiveDate>;
    fn to_precision(&self) -> DatePrecision;
}

impl TimelineEntry for AddressEntry {
    fn date_from(&self) -> NaiveDate {
        self.date_from
    }
    fn from_precision(&self) -> DatePrecision {
        self.from_precision
    }
    fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }
    fn to_precision(&self) -> DatePrecision {
        self.to_precision
    }
}

impl TimelineEntry for EmploymentEntry {
    fn date_from(&self) -> NaiveDate {
        self.date_from
    }
    fn from_precision(&self) -> DatePrecision {
        self.from_precision
    }
    fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }
    fn to_precision(&self) -> DatePrecision {
        self.to_precision
    }
}

// ============================================================================
// PERSON-LEVEL CONTAINER
// ============================================================================

/// Data for ONE person (petitioner or beneficiary).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonData {
    pub name: Option<PersonName>,

    /// Residential timeline (typically last 5 years)
    #[serde(default)]
    pub addresses_lived: Vec<AddressEntry>,

    /// Non-timeline addresses (FYI / disclosure)
    #[serde(default)]
    pub related_addresses: Vec<RelatedAddress>,

    /// USCIS-required anchor (may be older than timeline)
    pub last_foreign_address: Option<PostalAddress>,
    pub last_foreign_address_date_to: Option<NaiveDate>,

    #[serde(default)]
    pub employment: Vec<EmploymentEntry>,
    #[serde(default)]
    pub travel_entries: Vec<TravelEntry>,
}

// ============================================================================
// CASE WRAPPER
// ============================================================================

/// Marriage-based adjustment case.
/// Keeps petitioner and beneficiary clearly separated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImmigrationCase {
    pub petitioner: PersonData,
    pub beneficiary: PersonData,

    pub marriage_date: Option<NaiveDate>,
    pub marriage_city: Option<String>,
    pub marriage_state_province: Option<String>,
    pub marriage_country: Option<String>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip_enums() {
        let json = serde_json::to_string(&EmploymentType::SelfEmployed).unwrap();
        assert_eq!(json, "\"self_employed\"");

        let p: DatePrecision = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(p, DatePrecision::Month);
    }

    #[test]
    fn test_open_ended_entry_serializes_null() {
        let entry = AddressEntry {
            address: PostalAddress {
                street_name: "1518 Asterwind Dr".to_string(),
                unit_type: Some("Apt".to_string()),
                unit_number: Some("2A".to_string()),
                city: "Charlotte".to_string(),
                state_province: Some("NC".to_string()),
                zip_code: Some("28277".to_string()),
                country: "USA".to_string(),
            },
            date_from: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            from_precision: DatePrecision::Day,
            date_to: None,
            to_precision: DatePrecision::Day,
            address_type: AddressType::Lived,
            notes: None,
        };

        let v = serde_json::to_value(&entry).unwrap();
        assert!(v["date_to"].is_null());
        assert_eq!(v["date_from"], "2022-06-01");
    }

    #[test]
    fn test_timeline_entry_seam() {
        let emp = EmploymentEntry {
            employer: "ACME".to_string(),
            role: None,
            employer_address: None,
            date_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            from_precision: DatePrecision::Month,
            date_to: Some(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()),
            to_precision: DatePrecision::Month,
            employment_type: EmploymentType::Employed,
            notes: None,
        };

        let e: &dyn TimelineEntry = &emp;
        assert_eq!(e.from_precision(), DatePrecision::Month);
        assert_eq!(e.date_to(), Some(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()));
    }
}
