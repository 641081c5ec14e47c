//! Batch pipeline: extract, number, render.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::record::DocumentRecord;
use crate::pdf::TextSource;
use crate::report::{ReportParser, WorkOrderParser};
use crate::sequence::{
    current_month, format_generated_date, Clock, CounterState, CounterStore, NumberingMode,
    Sequencer,
};
use crate::summary;
use crate::template::DocumentRenderer;

/// Default prefix of rendered document file names.
pub const DEFAULT_FILE_PREFIX: &str = "JCR_";

/// One input file.
#[derive(Debug, Clone)]
pub struct InputDocument {
    /// Display name, usually the file name.
    pub name: String,
    /// Raw PDF bytes.
    pub data: Vec<u8>,
}

impl InputDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// One rendered output document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Output file name.
    pub file_name: String,
    /// Name of the input it was generated from.
    pub source: String,
    /// Rendered bytes.
    pub data: Vec<u8>,
}

/// Everything a batch produced.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Rendered documents in input order.
    pub documents: Vec<RenderedDocument>,
    /// Summary records, one per document, same order.
    pub records: Vec<DocumentRecord>,
    /// Counter state written at the end of the batch (monthly mode).
    pub counter: Option<CounterState>,
}

impl BatchResult {
    /// CSV summary of the batch.
    pub fn summary_csv(&self) -> Result<Vec<u8>> {
        summary::summary_csv(&self.records)
    }

    /// Write all documents, and the summary when `summary_file` is given,
    /// into `dir`. Returns the written paths.
    pub fn write_to(&self, dir: &Path, summary_file: Option<&str>) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.documents.len() + 1);

        for document in &self.documents {
            let path = dir.join(&document.file_name);
            fs::write(&path, &document.data)?;
            debug!("Wrote {} (from {})", path.display(), document.source);
            written.push(path);
        }

        if let Some(name) = summary_file {
            let path = dir.join(name);
            fs::write(&path, self.summary_csv()?)?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Output file name for a document.
///
/// `index` is 1-based and only used when the document has no identifier.
pub fn output_file_name(prefix: &str, doc_id: &str, index: usize) -> String {
    if doc_id.is_empty() {
        format!("{}unnumbered_{}.docx", prefix, index)
    } else {
        format!("{}{}.docx", prefix, doc_id)
    }
}

/// Sequential batch processor.
///
/// Documents are handled strictly in input order. The counter is read
/// once before the first document and written once after the last; any
/// error aborts the batch before the counter is written.
pub struct BatchProcessor<'a> {
    text_source: &'a dyn TextSource,
    renderer: &'a dyn DocumentRenderer,
    clock: &'a dyn Clock,
    parser: WorkOrderParser,
    file_prefix: String,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(
        text_source: &'a dyn TextSource,
        renderer: &'a dyn DocumentRenderer,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            text_source,
            renderer,
            clock,
            parser: WorkOrderParser::new(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }

    /// Set the output file name prefix.
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Process a batch.
    pub fn run(
        &self,
        inputs: &[InputDocument],
        mode: NumberingMode,
        store: &dyn CounterStore,
    ) -> Result<BatchResult> {
        self.run_with(inputs, mode, store, |_, _| {})
    }

    /// Process a batch, calling `on_document` after each rendered document.
    pub fn run_with<F>(
        &self,
        inputs: &[InputDocument],
        mode: NumberingMode,
        store: &dyn CounterStore,
        mut on_document: F,
    ) -> Result<BatchResult>
    where
        F: FnMut(&RenderedDocument, &DocumentRecord),
    {
        let month = current_month(self.clock);
        let mut sequencer = Sequencer::for_mode(mode, store, month)?;

        info!("Processing {} documents ({:?})", inputs.len(), mode);

        let mut documents = Vec::with_capacity(inputs.len());
        let mut records = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let text = self
                .text_source
                .document_text(&input.data)
                .inspect_err(|e| warn!("Failed to read {}: {}", input.name, e))?;

            let extraction = self.parser.parse(&text);
            if extraction.fields.is_empty() {
                warn!("{}: no work-order fields found", input.name);
            }
            for warning in &extraction.warnings {
                debug!("{}: {}", input.name, warning);
            }

            let doc_id = sequencer.next_id();
            let record = DocumentRecord::new(
                extraction.fields,
                doc_id,
                format_generated_date(self.clock.today()),
            );

            let data = self
                .renderer
                .render(&record)
                .inspect_err(|e| warn!("Failed to render {}: {}", input.name, e))?;

            let document = RenderedDocument {
                file_name: output_file_name(&self.file_prefix, &record.doc_id, index + 1),
                source: input.name.clone(),
                data,
            };
            debug!("{} -> {}", input.name, document.file_name);

            on_document(&document, &record);
            documents.push(document);
            records.push(record);
        }

        let counter = sequencer.finish();
        if let Some(state) = &counter {
            store.save(state)?;
            info!("Counter for month {} advanced to {}", month, state.next(month));
        }

        Ok(BatchResult {
            documents,
            records,
            counter,
        })
    }
}
