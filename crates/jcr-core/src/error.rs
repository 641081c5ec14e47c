//! Error types for the jcr-core library.

use thiserror::Error;

/// Main error type for the jcr library.
#[derive(Error, Debug)]
pub enum JcrError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Counter persistence error.
    #[error("counter error: {0}")]
    Counter(#[from] CounterError),

    /// Document numbering error.
    #[error("numbering error: {0}")]
    Sequence(#[from] SequenceError),

    /// Summary export error.
    #[error("summary error: {0}")]
    Summary(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,
}

/// Errors related to DOCX template handling.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template is not a readable zip package.
    #[error("invalid template archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The package has no main document part.
    #[error("template has no word/document.xml part")]
    MissingDocument,

    /// A part expected to be XML is not valid UTF-8.
    #[error("part {0} is not valid UTF-8")]
    Encoding(String),

    /// A placeholder names a field the record does not carry.
    #[error("unknown placeholder {{{{ {0} }}}}")]
    UnknownPlaceholder(String),

    /// I/O error while reading or writing parts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the persisted document counter.
#[derive(Error, Debug)]
pub enum CounterError {
    /// Reading or writing the counter file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The counter file is not a month-to-sequence JSON object.
    #[error("malformed counter file {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Errors related to document numbering.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// The starting number supplied by the caller is not an integer.
    #[error("invalid starting number: {0:?}")]
    InvalidStart(String),
}

/// Result type for the jcr library.
pub type Result<T> = std::result::Result<T, JcrError>;
