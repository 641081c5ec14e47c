//! PDF processing module.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextSource};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text of every page, in page order.
    ///
    /// A page without extractable text yields an empty string.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from the entire PDF, each page followed by a newline.
    fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in self.extract_pages()? {
            text.push_str(&page);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Source of plain text for one input document.
pub trait TextSource {
    /// Return the concatenated text of all pages of the document.
    fn document_text(&self, data: &[u8]) -> Result<String>;
}
