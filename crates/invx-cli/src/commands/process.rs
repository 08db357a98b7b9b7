//! Process command - extract the fields of a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use invx_core::batch::read_document_text;
use invx_core::invoice::rules::format_amount_us;
use invx_core::{
    Batch, CsvSink, ExtractionResult, FieldName, InvoiceParser, TabularSink, TemplateParser,
};

use super::{display_name, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.pdf or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON record
    Json,
    /// CSV header and one row
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Reading document...");

    let text = read_document_text(&args.input, &config.pdf)
        .with_context(|| format!("Failed to read {}", display_name(&args.input)))?;

    pb.set_message("Extracting fields...");
    let parser = TemplateParser::from_config(&config.extraction);
    let result = parser.parse(&text);

    pb.finish_and_clear();

    if !result.missing.is_empty() {
        debug!(
            "Missing fields: {}",
            result
                .missing
                .iter()
                .map(FieldName::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut batch = Batch::open();
    batch.push(result.record.clone());

    let mut sink = CsvSink::from_writer(Vec::new());
    sink.export(batch)?;

    Ok(String::from_utf8(sink.into_inner()?)?)
}

fn format_date(raw: &str, parsed: Option<NaiveDate>) -> String {
    match parsed {
        Some(date) => format!("{} ({})", raw, date.format("%Y-%m-%d")),
        None => raw.to_string(),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let record = &result.record;
    let dates = record.dates();
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", record.invoice_no));
    output.push_str(&format!(
        "Date: {}\n",
        format_date(&record.invoice_date, dates.invoice_date)
    ));
    output.push('\n');

    output.push_str("Customer:\n");
    output.push_str(&format!("  {}\n", record.customer_name));
    output.push('\n');

    output.push_str("References:\n");
    output.push_str(&format!(
        "  PO:            {} {}\n",
        record.po_no,
        format_date(&record.po_date, dates.po_date)
    ));
    output.push_str(&format!(
        "  Order:         {} {}\n",
        record.order_no,
        format_date(&record.order_date, dates.order_date)
    ));
    output.push_str(&format!(
        "  Delivery note: {} {}\n",
        record.delivery_note_no,
        format_date(&record.delivery_date, dates.delivery_date)
    ));
    output.push('\n');

    let value = record
        .invoice_value
        .map(format_amount_us)
        .unwrap_or_default();
    output.push_str(&format!("Value: {}\n", value));
    output.push_str(&format!("Terms: {}\n", record.term_of_payment));

    if !result.missing.is_empty() {
        let missing: Vec<&str> = result.missing.iter().map(FieldName::as_str).collect();
        output.push_str(&format!("\nMissing: {}\n", missing.join(", ")));
    }

    output
}
