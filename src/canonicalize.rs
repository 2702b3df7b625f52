// 🏠 Address Canonicalization - deterministic identity keys
// Builds (strict_key, loose_key) pairs so addresses can be matched across
// two people's timelines by pure string equality. All lookup tables are
// immutable module data - never mutable process-wide state.

use serde::{Deserialize, Serialize};

use crate::models::PostalAddress;

// ============================================================================
// LOOKUP TABLES (immutable)
// ============================================================================

const US_COUNTRY_ALIASES: &[&str] = &["us", "usa", "united states", "united states of america"];

/// Common unit-type synonyms folded to a canonical token.
const UNIT_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("apt", "apt"),
    ("apartment", "apt"),
    ("unit", "unit"),
    ("ste", "ste"),
    ("suite", "ste"),
    ("fl", "fl"),
    ("floor", "fl"),
];

const US_STATE_NAME_TO_CODE: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

// ============================================================================
// TEXT NORMALIZATION
// ============================================================================

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep letters/digits/spaces; drop punctuation like . , # etc.
fn strip_punct_keep_alnum_space(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

pub fn normalize_text(s: Option<&str>) -> Option<String> {
    let t = collapse_whitespace(&s?.trim().to_lowercase());
    if t.is_empty() {
        return None;
    }
    let t = collapse_whitespace(&strip_punct_keep_alnum_space(&t));
    if t.is_empty() {
        None
    } else {
        Some(t)
    }
}

pub fn normalize_country(country: Option<&str>) -> Option<String> {
    let c = normalize_text(country)?;
    if US_COUNTRY_ALIASES.contains(&c.as_str()) {
        return Some("us".to_string());
    }
    Some(c)
}

/// Normalize state/province.
///
/// - 2-letter code -> uppercase ("nc" -> "NC")
/// - full US state name -> 2-letter code ("north carolina" -> "NC")
/// - anything else -> normalized text (non-US provinces/regions)
pub fn normalize_state(state: Option<&str>) -> Option<String> {
    let s = normalize_text(state)?;

    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_lowercase()) {
        return Some(s.to_uppercase());
    }

    if let Some(code) = lookup(US_STATE_NAME_TO_CODE, &s) {
        return Some(code.to_string());
    }

    Some(s)
}

/// Normalize to ZIP5 when possible.
/// "28277" -> "28277", "28277-1234" -> "28277", "282771234" -> "28277"
pub fn normalize_zip(zip_code: Option<&str>) -> Option<String> {
    let z = zip_code?.trim();
    if z.is_empty() {
        return None;
    }

    let digits: String = z.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 5 {
        return Some(digits[..5].to_string()); // ZIP5 for matching
    }
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

pub fn normalize_unit_type(unit_type: Option<&str>) -> Option<String> {
    let t = normalize_text(unit_type)?;
    match lookup(UNIT_TYPE_SYNONYMS, &t) {
        Some(canonical) => Some(canonical.to_string()),
        None => Some(t),
    }
}

/// " 2 A " -> "2A"
pub fn normalize_unit_number(unit_number: Option<&str>) -> Option<String> {
    let u = unit_number?.trim();
    if u.is_empty() {
        return None;
    }
    let u: String = u
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if u.is_empty() {
        None
    } else {
        Some(u)
    }
}

pub fn normalize_street(street: Option<&str>) -> Option<String> {
    normalize_text(street)
}

// ============================================================================
// ADDRESS KEYS
// ============================================================================

/// strict_key: includes unit + ZIP5 when available (strongest match)
/// loose_key:  excludes unit and zip (useful for near-match detection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressKeys {
    pub strict_key: String,
    pub loose_key: String,
}

/// Build deterministic keys for matching addresses across people.
///
/// strict_key: street | unit_type | unit_number | city | state | zip5 | country
/// loose_key:  street | city | state | country
///
/// Missing fields become empty tokens (stable shape).
pub fn address_keys(addr: &PostalAddress) -> AddressKeys {
    let street = normalize_street(Some(&addr.street_name)).unwrap_or_default();
    let city = normalize_text(Some(&addr.city)).unwrap_or_default();
    let state = normalize_state(addr.state_province.as_deref()).unwrap_or_default();
    let country = normalize_country(Some(&addr.country)).unwrap_or_default();
    let zip5 = normalize_zip(addr.zip_code.as_deref()).unwrap_or_default();

    let unit_type = normalize_unit_type(addr.unit_type.as_deref()).unwrap_or_default();
    let unit_number = normalize_unit_number(addr.unit_number.as_deref()).unwrap_or_default();

    let strict = [
        street.as_str(),
        unit_type.as_str(),
        unit_number.as_str(),
        city.as_str(),
        state.as_str(),
        zip5.as_str(),
        country.as_str(),
    ]
    .join("|");
    let loose = [street.as_str(), city.as_str(), state.as_str(), country.as_str()].join("|");

    AddressKeys {
        strict_key: strict,
        loose_key: loose,
    }
}

/// Return (strict_match, loose_match).
pub fn compare_addresses(a: &PostalAddress, b: &PostalAddress) -> (bool, bool) {
    let ak = address_keys(a);
    let bk = address_keys(b);
    (ak.strict_key == bk.strict_key, ak.loose_key == bk.loose_key)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(
        street: &str,
        unit_type: Option<&str>,
        unit_number: Option<&str>,
        zip: Option<&str>,
    ) -> PostalAddress {
        PostalAddress {
            street_name: street.to_string(),
            unit_type: unit_type.map(String::from),
            unit_number: unit_number.map(String::from),
            city: "Charlotte".to_string(),
            state_province: Some("NC".to_string()),
            zip_code: zip.map(String::from),
            country: "USA".to_string(),
        }
    }

    #[test]
    fn test_normalize_text_strips_punct_and_case() {
        assert_eq!(
            normalize_text(Some("  1518  Asterwind   Dr. ")),
            Some("1518 asterwind dr".to_string())
        );
        assert_eq!(normalize_text(Some("  . , # ")), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_normalize_country_aliases() {
        assert_eq!(normalize_country(Some("USA")), Some("us".to_string()));
        assert_eq!(normalize_country(Some("United States")), Some("us".to_string()));
        assert_eq!(normalize_country(Some("Colombia")), Some("colombia".to_string()));
    }

    #[test]
    fn test_normalize_state_codes_and_names() {
        assert_eq!(normalize_state(Some("nc")), Some("NC".to_string()));
        assert_eq!(normalize_state(Some("North Carolina")), Some("NC".to_string()));
        assert_eq!(normalize_state(Some("Antioquia")), Some("antioquia".to_string()));
        assert_eq!(normalize_state(None), None);
    }

    #[test]
    fn test_normalize_zip5() {
        assert_eq!(normalize_zip(Some("28277")), Some("28277".to_string()));
        assert_eq!(normalize_zip(Some("28277-1234")), Some("28277".to_string()));
        assert_eq!(normalize_zip(Some("282771234")), Some("28277".to_string()));
        assert_eq!(normalize_zip(Some("  ")), None);
    }

    #[test]
    fn test_normalize_unit_fields() {
        assert_eq!(normalize_unit_type(Some("Apartment")), Some("apt".to_string()));
        assert_eq!(normalize_unit_type(Some("Suite")), Some("ste".to_string()));
        assert_eq!(normalize_unit_number(Some(" 2 a ")), Some("2A".to_string()));
        assert_eq!(normalize_unit_number(Some("#2-A")), Some("2A".to_string()));
    }

    #[test]
    fn test_strict_match_same_address() {
        let a = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"), Some("28277"));
        let b = addr("1518 Asterwind Dr.", Some("Apartment"), Some("2a"), Some("28277-1234"));

        let (strict, loose) = compare_addresses(&a, &b);
        assert!(strict);
        assert!(loose);
    }

    #[test]
    fn test_loose_match_when_unit_differs() {
        // "Apt" and "Unit" are different canonical tokens, so strict fails
        let a = addr("1518 Asterwind Dr", Some("Apt"), Some("2A"), Some("28277"));
        let b = addr("1518 Asterwind Dr", Some("Unit"), Some("2A"), Some("28277"));

        let (strict, loose) = compare_addresses(&a, &b);
        assert!(!strict);
        assert!(loose);
    }

    #[test]
    fn test_no_match_different_street() {
        let a = addr("111 First St", None, None, Some("28209"));
        let b = addr("999 Ninth St", None, None, Some("28209"));

        let (strict, loose) = compare_addresses(&a, &b);
        assert!(!strict);
        assert!(!loose);
    }

    #[test]
    fn test_keys_have_stable_shape_with_missing_fields() {
        let a = addr("111 First St", None, None, None);
        let keys = address_keys(&a);
        assert_eq!(keys.strict_key, "111 first st|||charlotte|NC||us");
        assert_eq!(keys.loose_key, "111 first st|charlotte|NC|us");
    }
}
