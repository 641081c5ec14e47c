//! Generate command - render reports for a batch of work-order PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use jcr_core::batch::{BatchProcessor, InputDocument};
use jcr_core::pdf::PdfTextSource;
use jcr_core::sequence::{JsonFileStore, NumberingMode, SystemClock};
use jcr_core::template::DocxTemplate;

use super::load_config;

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Input PDF files or glob patterns; a file matched more than once is processed once
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Word template (.docx); defaults to template.path from the config
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// How document IDs are assigned
    #[arg(short, long, value_enum, default_value = "monthly")]
    numbering: Numbering,

    /// Starting document number (explicit numbering only)
    #[arg(short, long)]
    start: Option<String>,

    /// Do not write the CSV summary
    #[arg(long)]
    no_summary: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Numbering {
    /// Month number + 3-digit sequence from the persisted counter
    Monthly,
    /// Plain integers counting up from --start (empty without it)
    Explicit,
}

pub async fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Reject a bad starting number before touching any file
    let mode = match args.numbering {
        Numbering::Monthly => {
            if args.start.is_some() {
                anyhow::bail!("--start requires --numbering explicit");
            }
            NumberingMode::Monthly
        }
        Numbering::Explicit => NumberingMode::explicit(args.start.as_deref())?,
    };

    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for: {}", args.inputs.join(", "));
    }

    let template_path = args
        .template
        .clone()
        .or_else(|| config.template.path.clone())
        .ok_or_else(|| anyhow::anyhow!("No template given. Use --template or set template.path."))?;

    let template = DocxTemplate::from_bytes(fs::read(&template_path)?)?;
    debug!(
        "Template {} uses placeholders {:?}",
        template_path.display(),
        template.placeholders()?
    );

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let inputs = files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("document.pdf")
                .to_string();
            Ok(InputDocument::new(name, fs::read(path)?))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let clock = SystemClock;
    let text_source = PdfTextSource;
    let store = JsonFileStore::new(&config.counter.path);

    let processor = BatchProcessor::new(&text_source, &template, &clock)
        .with_file_prefix(config.output.file_prefix.clone());

    let result = processor.run_with(&inputs, mode, &store, |document, record| {
        info!("{} -> {} (WO {:?})", document.source, document.file_name, record.wo_number);
        pb.inc(1);
    });
    pb.finish_and_clear();
    let result = result?;

    let output_dir = args.output_dir.unwrap_or(config.output.dir.clone());
    let summary_file = (!args.no_summary).then_some(config.output.summary_file.as_str());
    let written = result.write_to(&output_dir, summary_file)?;

    for path in &written {
        println!("{} Wrote {}", style("✓").green(), path.display());
    }

    if let Some(counter) = &result.counter {
        debug!("Counter state after batch: {:?}", counter);
        println!(
            "{} Counter saved to {}",
            style("ℹ").blue(),
            store.path().display()
        );
    }

    println!();
    println!(
        "{} Generated {} documents in {:?}",
        style("✓").green(),
        result.documents.len(),
        start.elapsed()
    );

    Ok(())
}

/// Expand paths and glob patterns into PDF files, keeping argument order.
fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        for path in glob(pattern)?.filter_map(|r| r.ok()) {
            if !is_pdf(&path) {
                continue;
            }
            if files.contains(&path) {
                warn!("Skipping {}: already listed", path.display());
                continue;
            }
            files.push(path);
        }
    }

    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_filters_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pattern = dir.path().join("*").display().to_string();
        let single = dir.path().join("b.pdf").display().to_string();
        let files = expand_inputs(&[single, pattern]).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b.pdf", "a.PDF"]);
    }
}
