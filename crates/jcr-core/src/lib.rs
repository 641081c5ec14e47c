//! Core library for job completion report generation.
//!
//! This crate provides:
//! - PDF text extraction (per page, tolerant of pages without text)
//! - Work-order field extraction (WO number, facility, dates)
//! - Document numbering from a monthly counter or an explicit start
//! - DOCX template rendering and CSV summaries

pub mod batch;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod sequence;
pub mod summary;
pub mod template;

pub use batch::{BatchProcessor, BatchResult, InputDocument, RenderedDocument};
pub use error::{JcrError, Result};
pub use models::{DocumentRecord, JcrConfig, WorkOrderFields};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource, TextSource};
pub use report::{extract, ReportParser, WorkOrderParser};
pub use sequence::{
    assign_ids, Clock, CounterState, CounterStore, JsonFileStore, NumberingMode, Sequencer,
    SystemClock,
};
pub use template::{DocumentRenderer, DocxTemplate};
