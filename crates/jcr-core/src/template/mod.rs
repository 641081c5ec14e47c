//! Document templating module.

mod docx;

pub use docx::{DocxTemplate, DOCUMENT_PART};

use crate::error::TemplateError;
use crate::models::record::DocumentRecord;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Trait for turning a record into a rendered document.
pub trait DocumentRenderer {
    /// Render one record, returning the output file bytes.
    fn render(&self, record: &DocumentRecord) -> Result<Vec<u8>>;
}
