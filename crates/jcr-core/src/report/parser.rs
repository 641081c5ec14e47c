//! Work-order report parser combining the field rules.

use std::time::Instant;

use tracing::debug;

use crate::models::record::WorkOrderFields;

use super::rules::{
    extract_dates, extract_facility, patterns::WO_NUMBER, FacilityExtractor, FieldExtractor,
};

/// Result of report extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub fields: WorkOrderFields,
    /// Fields that resolved to the empty string, and facility codes that
    /// were ignored because an earlier one was taken.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for report parsing.
///
/// Parsing never fails: a field whose pattern does not match is left
/// empty so every record stays renderable.
pub trait ReportParser {
    /// Parse report fields from text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Regex-rule parser for work-order reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkOrderParser;

impl WorkOrderParser {
    pub fn new() -> Self {
        Self
    }

    fn extract_wo_number(&self, text: &str) -> String {
        WO_NUMBER
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }
}

impl ReportParser for WorkOrderParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let facility = extract_facility(text);
        let dates = extract_dates(text);

        let fields = WorkOrderFields {
            wo_number: self.extract_wo_number(text),
            facility_code: facility.code,
            facility_location: facility.location,
            reported_on: dates.reported_on,
            issued_on: dates.issued_on,
            est_completion_date: dates.est_completion_date,
        };

        let mut warnings: Vec<String> = [
            ("WO_NUMBER", &fields.wo_number),
            ("FACILITY_CODE", &fields.facility_code),
            ("FACILITY_LOCATION", &fields.facility_location),
            ("ISSUED_ON", &fields.issued_on),
            ("EST_COMPLETION_DATE", &fields.est_completion_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| format!("Could not extract {}", name))
        .collect();

        for ignored in FacilityExtractor::new().extract_all(text).iter().skip(1) {
            if let Some((start, _)) = ignored.position {
                warnings.push(format!(
                    "Ignoring facility code {} at byte {}",
                    ignored.value, start
                ));
            }
        }

        debug!(
            "Extracted WO {:?} from {} chars ({} warnings)",
            fields.wo_number,
            text.len(),
            warnings.len()
        );

        ExtractionResult {
            fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Extract work-order fields from raw document text.
pub fn extract(text: &str) -> WorkOrderFields {
    WorkOrderParser::new().parse(text).fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_work_order() {
        let text = "\
Work Order Report
WO Number: 4821
Facility: FM1234 Springfield Plant
Issued: 01.02.2024
Completed: 15.02.2024
";

        let fields = extract(text);

        assert_eq!(
            fields,
            WorkOrderFields {
                wo_number: "4821".to_string(),
                facility_code: "FM1234".to_string(),
                facility_location: "Springfield Plant".to_string(),
                reported_on: "15.02.2024".to_string(),
                issued_on: "01.02.2024".to_string(),
                est_completion_date: "15.02.2024".to_string(),
            }
        );
    }

    #[test]
    fn test_three_dates() {
        let text = "WO Number: 7\n10.03.2024\n12.03.2024\n20.03.2024\n";
        let fields = extract(text);

        assert_eq!(fields.issued_on, "10.03.2024");
        assert_eq!(fields.est_completion_date, "12.03.2024");
        assert_eq!(fields.reported_on, "20.03.2024");
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        let result = WorkOrderParser::new().parse("");

        assert!(result.fields.is_empty());
        assert_eq!(result.warnings.len(), 5);
    }

    #[test]
    fn test_label_must_match_exactly() {
        assert_eq!(extract("WO Number:4821").wo_number, "");
        assert_eq!(extract("wo number: 4821").wo_number, "");
        assert_eq!(extract("WO Number: 4821/A").wo_number, "4821");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "WO Number: 1\nWO Number: 2\nFM0001 North\nFM0002 South\n";
        let fields = extract(text);

        assert_eq!(fields.wo_number, "1");
        assert_eq!(fields.facility_code, "FM0001");
        assert_eq!(fields.facility_location, "North");
    }

    #[test]
    fn test_extra_facility_codes_are_reported() {
        let text = "WO Number: 3
FM0001 North
FM0002 South
01.02.2024
02.02.2024
";
        let result = WorkOrderParser::new().parse(text);

        assert_eq!(result.fields.facility_code, "FM0001");
        assert_eq!(
            result.warnings,
            vec!["Ignoring facility code FM0002 at byte 26".to_string()]
        );
    }
}
