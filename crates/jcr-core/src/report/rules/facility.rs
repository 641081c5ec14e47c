//! Facility code and location extraction.

use super::patterns::{FACILITY_CODE, FACILITY_LOCATION};
use super::{ExtractionMatch, FieldExtractor};

/// Facility code extractor (`FM` followed by four digits).
pub struct FacilityExtractor;

impl FacilityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FacilityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for FacilityExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        FACILITY_CODE
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string()).with_position(m.start(), m.end()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        FACILITY_CODE
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string()).with_position(m.start(), m.end()))
            .collect()
    }
}

/// Facility identification from a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facility {
    pub code: String,
    pub location: String,
}

/// Extract the facility code and the location written after it.
pub fn extract_facility(text: &str) -> Facility {
    let code = FacilityExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default();

    let location = FACILITY_LOCATION
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    Facility { code, location }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_location() {
        let facility = extract_facility("Site: FM1234 Springfield Plant  \nNext line");

        assert_eq!(facility.code, "FM1234");
        assert_eq!(facility.location, "Springfield Plant");
    }

    #[test]
    fn test_no_code() {
        assert_eq!(extract_facility("Facility: none"), Facility::default());
    }

    #[test]
    fn test_code_at_end_of_line_has_no_location() {
        let facility = extract_facility("FM0042\nWarehouse");

        assert_eq!(facility.code, "FM0042");
        assert_eq!(facility.location, "");
    }

    #[test]
    fn test_longer_digit_run_takes_first_four() {
        let facility = extract_facility("FM123456");
        assert_eq!(facility.code, "FM1234");
    }

    #[test]
    fn test_extract_all_codes() {
        let codes = FacilityExtractor::new().extract_all("FM0001 A\nFM0002 B");
        let values: Vec<_> = codes.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec!["FM0001", "FM0002"]);
    }
}
