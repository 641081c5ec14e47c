//! Work-order report field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract, ExtractionResult, ReportParser, WorkOrderParser};
