use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use assert_cmd::Command;
use chrono::{Datelike, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Write a config file pointing counter and output into `dir`.
fn write_config(dir: &Path) -> String {
    let config = serde_json::json!({
        "counter": { "path": dir.join("counter.json") },
        "output": { "dir": dir.join("out") },
    });
    let path = dir.join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path.display().to_string()
}

/// Single-page PDF showing `text` in one line.
fn work_order_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

/// Minimal Word package whose body is `body`.
fn template_docx(body: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(body.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn read_document_xml(docx: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn jcr() -> Command {
    Command::cargo_bin("jcr").unwrap()
}

#[test]
fn invalid_start_aborts_before_any_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("wo.pdf"), b"%PDF-1.4").unwrap();

    jcr()
        .args(["-c", config.as_str(), "generate"])
        .arg(dir.path().join("wo.pdf"))
        .args(["--template", "missing.docx", "--numbering", "explicit", "--start", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid starting number"));

    assert!(!dir.path().join("out").exists());
    assert!(!dir.path().join("counter.json").exists());
}

#[test]
fn generate_writes_documents_summary_and_counter() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let today = Local::now();
    let month = today.month();

    let pdf = dir.path().join("wo.pdf");
    fs::write(&pdf, work_order_pdf("WO Number: 4821 FM1234 Depot 01.02.2024")).unwrap();
    let template = dir.path().join("template.docx");
    fs::write(
        &template,
        template_docx("<w:t>{{ DOC_ID }}|{{ WO_NUMBER }}|{{ FACILITY_CODE }}|{{ GENERATED_DATE }}</w:t>"),
    )
    .unwrap();
    let counter_path = dir.path().join("counter.json");
    fs::write(&counter_path, format!(r#"{{"{}": 5}}"#, month)).unwrap();

    jcr()
        .args(["-c", config.as_str(), "generate"])
        .arg(&pdf)
        .arg("--template")
        .arg(&template)
        .assert()
        .success();

    let doc_id = format!("{}005", month);
    let docx = fs::read(dir.path().join("out").join(format!("JCR_{}.docx", doc_id))).unwrap();
    assert_eq!(
        read_document_xml(&docx),
        format!(
            "<w:t>{}|4821|FM1234|{}</w:t>",
            doc_id,
            today.format("%d.%m.%Y")
        )
    );

    let summary = fs::read_to_string(dir.path().join("out").join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next().unwrap(),
        "WO_NUMBER,FACILITY_CODE,FACILITY_LOCATION,REPORTED_ON,ISSUED_ON,EST_COMPLETION_DATE,DOC_ID,GENERATED_DATE"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("4821,FM1234,"));
    assert!(row.contains(&format!(",01.02.2024,01.02.2024,,{},", doc_id)));

    let stored = fs::read_to_string(&counter_path).unwrap();
    assert_eq!(stored, format!(r#"{{"{}":6}}"#, month));
}

#[test]
fn start_requires_explicit_numbering() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    jcr()
        .args(["-c", config.as_str(), "generate", "wo.pdf", "--start", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--numbering explicit"));
}

#[test]
fn no_matching_inputs() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let pattern = dir.path().join("*.pdf").display().to_string();

    jcr()
        .args(["-c", config.as_str(), "generate", pattern.as_str(), "--template", "t.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}

#[test]
fn counter_show_without_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let month = Local::now().month();

    jcr()
        .args(["-c", config.as_str(), "counter", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}001", month)));
}

#[test]
fn counter_reset_discards_other_months() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let month = Local::now().month();
    let other = month % 12 + 1;

    let counter_path = dir.path().join("counter.json");
    fs::write(&counter_path, format!(r#"{{"{}": 8, "{}": 2}}"#, month, other)).unwrap();

    jcr()
        .args(["-c", config.as_str(), "counter", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Counter reset to 1"));

    let stored = fs::read_to_string(&counter_path).unwrap();
    assert_eq!(stored, format!(r#"{{"{}":1}}"#, month));
}

#[test]
fn config_get_reads_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    jcr()
        .args(["-c", config.as_str(), "config", "get", "output.file_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"JCR_\""));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    jcr()
        .args(["-c", config.as_str(), "config", "set", "output.file_prefix", "WO_"])
        .assert()
        .success();

    jcr()
        .args(["-c", config.as_str(), "config", "get", "output.file_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"WO_\""));
}
