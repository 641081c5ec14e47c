//! Date token extraction for work-order reports.
//!
//! Dates are matched by shape only (`DD.DD.DDDD`) and kept as the text
//! that appeared in the document. Which token lands in which field depends
//! solely on its position in the text, not on nearby labels.

use super::patterns::DATE_TOKEN;
use super::{ExtractionMatch, FieldExtractor};

/// Date token extractor.
pub struct DateTokenExtractor;

impl DateTokenExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateTokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateTokenExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_TOKEN
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string()).with_position(m.start(), m.end()))
            .collect()
    }
}

/// Dates assigned to report fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDates {
    /// First token.
    pub issued_on: String,
    /// Second token, empty with fewer than two.
    pub est_completion_date: String,
    /// Last token.
    pub reported_on: String,
}

/// Assign date tokens by position of appearance.
pub fn extract_dates(text: &str) -> ReportDates {
    let tokens: Vec<String> = DateTokenExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();

    ReportDates {
        issued_on: tokens.first().cloned().unwrap_or_default(),
        est_completion_date: tokens.get(1).cloned().unwrap_or_default(),
        reported_on: tokens.last().cloned().unwrap_or_default(),
    }
}
