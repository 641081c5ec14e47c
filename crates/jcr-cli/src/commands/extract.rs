//! Extract command - show the fields found in a single work-order PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use jcr_core::models::record::WorkOrderFields;
use jcr_core::pdf::{PdfExtractor, PdfProcessor};
use jcr_core::report::{ReportParser, WorkOrderParser};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that could not be found
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let text = extractor.extract_text()?;
    let result = WorkOrderParser::new().parse(&text);

    let output = format_fields(&result.fields, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Missing fields:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    Ok(())
}

fn format_fields(fields: &WorkOrderFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_fields_csv(fields),
        OutputFormat::Text => Ok(format_fields_text(fields)),
    }
}

fn format_fields_csv(fields: &WorkOrderFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "WO_NUMBER",
        "FACILITY_CODE",
        "FACILITY_LOCATION",
        "REPORTED_ON",
        "ISSUED_ON",
        "EST_COMPLETION_DATE",
    ])?;
    wtr.write_record([
        &fields.wo_number,
        &fields.facility_code,
        &fields.facility_location,
        &fields.reported_on,
        &fields.issued_on,
        &fields.est_completion_date,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_fields_text(fields: &WorkOrderFields) -> String {
    let mut output = String::new();

    output.push_str(&format!("Work order: {}\n", fields.wo_number));
    output.push_str(&format!(
        "Facility:   {} {}\n",
        fields.facility_code, fields.facility_location
    ));
    output.push_str(&format!("Issued:     {}\n", fields.issued_on));
    output.push_str(&format!("Est. done:  {}\n", fields.est_completion_date));
    output.push_str(&format!("Reported:   {}\n", fields.reported_on));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> WorkOrderFields {
        WorkOrderFields {
            wo_number: "4821".to_string(),
            facility_code: "FM1234".to_string(),
            facility_location: "Springfield Plant".to_string(),
            reported_on: "15.02.2024".to_string(),
            issued_on: "01.02.2024".to_string(),
            est_completion_date: "15.02.2024".to_string(),
        }
    }

    #[test]
    fn test_csv_format() {
        let csv = format_fields(&fields(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("WO_NUMBER,FACILITY_CODE"));
        assert_eq!(
            lines.next().unwrap(),
            "4821,FM1234,Springfield Plant,15.02.2024,01.02.2024,15.02.2024"
        );
    }

    #[test]
    fn test_json_format_uses_field_names() {
        let json = format_fields(&fields(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"FACILITY_LOCATION\": \"Springfield Plant\""));
    }
}
