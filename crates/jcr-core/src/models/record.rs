//! Work-order field and document record models.

use serde::{Deserialize, Serialize};

/// Field names in summary column order.
pub const FIELD_NAMES: [&str; 8] = [
    "WO_NUMBER",
    "FACILITY_CODE",
    "FACILITY_LOCATION",
    "REPORTED_ON",
    "ISSUED_ON",
    "EST_COMPLETION_DATE",
    "DOC_ID",
    "GENERATED_DATE",
];

/// Fields extracted from one work-order report.
///
/// Every field is always present; a pattern that did not match leaves
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WorkOrderFields {
    /// Work-order number following the "WO Number:" label.
    pub wo_number: String,

    /// Facility code ("FM" and four digits).
    pub facility_code: String,

    /// Text following the facility code on the same line.
    pub facility_location: String,

    /// Last date token in the document.
    pub reported_on: String,

    /// First date token in the document.
    pub issued_on: String,

    /// Second date token in the document.
    pub est_completion_date: String,
}

impl WorkOrderFields {
    /// True when no pattern matched at all.
    pub fn is_empty(&self) -> bool {
        self.wo_number.is_empty()
            && self.facility_code.is_empty()
            && self.facility_location.is_empty()
            && self.reported_on.is_empty()
            && self.issued_on.is_empty()
            && self.est_completion_date.is_empty()
    }
}

/// A fully numbered record, one per processed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DocumentRecord {
    pub wo_number: String,
    pub facility_code: String,
    pub facility_location: String,
    pub reported_on: String,
    pub issued_on: String,
    pub est_completion_date: String,

    /// Assigned document identifier (may be empty).
    pub doc_id: String,

    /// Date the document was generated, `DD.MM.YYYY`.
    pub generated_date: String,
}

impl DocumentRecord {
    /// Stamp extracted fields with an identifier and generation date.
    pub fn new(
        fields: WorkOrderFields,
        doc_id: impl Into<String>,
        generated_date: impl Into<String>,
    ) -> Self {
        Self {
            wo_number: fields.wo_number,
            facility_code: fields.facility_code,
            facility_location: fields.facility_location,
            reported_on: fields.reported_on,
            issued_on: fields.issued_on,
            est_completion_date: fields.est_completion_date,
            doc_id: doc_id.into(),
            generated_date: generated_date.into(),
        }
    }

    /// Look up a field by its upper-case name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "WO_NUMBER" => &self.wo_number,
            "FACILITY_CODE" => &self.facility_code,
            "FACILITY_LOCATION" => &self.facility_location,
            "REPORTED_ON" => &self.reported_on,
            "ISSUED_ON" => &self.issued_on,
            "EST_COMPLETION_DATE" => &self.est_completion_date,
            "DOC_ID" => &self.doc_id,
            "GENERATED_DATE" => &self.generated_date,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Field values in [`FIELD_NAMES`] order.
    pub fn values(&self) -> [&str; 8] {
        [
            self.wo_number.as_str(),
            self.facility_code.as_str(),
            self.facility_location.as_str(),
            self.reported_on.as_str(),
            self.issued_on.as_str(),
            self.est_completion_date.as_str(),
            self.doc_id.as_str(),
            self.generated_date.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_covers_all_names() {
        let record = DocumentRecord::new(
            WorkOrderFields {
                wo_number: "4821".to_string(),
                ..Default::default()
            },
            "6005",
            "03.06.2024",
        );

        for (name, value) in FIELD_NAMES.iter().zip(record.values()) {
            assert_eq!(record.field(name), Some(value));
        }
        assert_eq!(record.field("WO_NUMBER"), Some("4821"));
        assert_eq!(record.field("wo_number"), None);
    }

    #[test]
    fn test_serializes_with_upper_case_keys() {
        let record = DocumentRecord::new(WorkOrderFields::default(), "", "01.01.2024");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["DOC_ID"], "");
        assert_eq!(json["GENERATED_DATE"], "01.01.2024");
        assert_eq!(json.as_object().unwrap().len(), FIELD_NAMES.len());
    }
}
