//! DOCX template rendering.
//!
//! A template is an ordinary Word package whose text contains
//! `{{ FIELD_NAME }}` placeholders. Rendering rewrites the main document,
//! headers and footers; every other part is copied byte for byte.

use std::io::{Cursor, Read, Write};

use lazy_static::lazy_static;
use quick_xml::escape::escape;
use regex::Regex;
use tracing::{debug, trace};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::{DocumentRenderer, Result};
use crate::error::TemplateError;
use crate::models::record::DocumentRecord;

/// Main document part of a Word package.
pub const DOCUMENT_PART: &str = "word/document.xml";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap();

    // Run/property markup Word inserts when a placeholder is split across runs
    static ref XML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();

    // Braces of one delimiter landing in different runs
    static ref SPLIT_OPEN: Regex = Regex::new(r"\{(?:<[^>]*>)+\{").unwrap();
    static ref SPLIT_CLOSE: Regex = Regex::new(r"\}(?:<[^>]*>)+\}").unwrap();
}

/// A loaded DOCX template.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    data: Vec<u8>,
}

impl DocxTemplate {
    /// Load a template from the bytes of a .docx file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data.as_slice()))?;
        if !archive.file_names().any(|name| name == DOCUMENT_PART) {
            return Err(TemplateError::MissingDocument);
        }

        debug!("Loaded template with {} parts", archive.len());
        Ok(Self { data })
    }

    /// Placeholder names used by the template, in order of appearance.
    pub fn placeholders(&self) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(Cursor::new(self.data.as_slice()))?;
        let mut names = Vec::new();

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let part = entry.name().to_string();
            if !is_templated_part(&part) {
                continue;
            }

            let xml = join_split_braces(&read_xml(&mut entry, &part)?);
            for caps in PLACEHOLDER.captures_iter(&xml) {
                let name = placeholder_name(&caps[1]);
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        Ok(names)
    }
}

impl DocumentRenderer for DocxTemplate {
    fn render(&self, record: &DocumentRecord) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(self.data.as_slice()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let part = entry.name().to_string();

            if is_templated_part(&part) {
                let xml = join_split_braces(&read_xml(&mut entry, &part)?);
                let rendered = substitute(&xml, record)?;

                let options = SimpleFileOptions::default().compression_method(entry.compression());
                writer.start_file(part.as_str(), options)?;
                writer.write_all(rendered.as_bytes())?;
                trace!("Rendered part {}", part);
            } else {
                writer.raw_copy_file(entry)?;
            }
        }

        let output = writer.finish()?.into_inner();
        debug!("Rendered document {:?} ({} bytes)", record.doc_id, output.len());
        Ok(output)
    }
}

/// Parts that may carry placeholders.
fn is_templated_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }

    name.strip_prefix("word/")
        .map(|rest| {
            (rest.starts_with("header") || rest.starts_with("footer"))
                && rest.ends_with(".xml")
                && !rest.contains('/')
        })
        .unwrap_or(false)
}

fn read_xml(entry: &mut impl Read, part: &str) -> Result<String> {
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| TemplateError::Encoding(part.to_string()))
}

/// Rejoin `{{` and `}}` delimiters whose two braces sit in separate runs.
fn join_split_braces(xml: &str) -> String {
    let xml = SPLIT_OPEN.replace_all(xml, "{{");
    SPLIT_CLOSE.replace_all(&xml, "}}").into_owned()
}

fn placeholder_name(inner: &str) -> String {
    XML_TAG.replace_all(inner, "").trim().to_string()
}

/// Replace every placeholder in `xml` with the escaped field value.
fn substitute(xml: &str, record: &DocumentRecord) -> Result<String> {
    let mut output = String::with_capacity(xml.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(xml) {
        let Some(whole) = caps.get(0) else { continue };
        let name = placeholder_name(&caps[1]);
        let value = record
            .field(&name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;

        output.push_str(&xml[last..whole.start()]);
        output.push_str(&escape(value));
        last = whole.end();
    }

    output.push_str(&xml[last..]);
    Ok(output)
}
