//! Batch command - convert a set of invoice files into one table.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use invx_core::batch::read_document_text;
use invx_core::models::{ExportConfig, ExportFormat};
use invx_core::{
    Batch, BatchAggregator, CsvSink, InvxError, JsonSink, SqliteSink, TabularSink, TemplateParser,
    TextDocument, XlsxSink,
};

use super::{display_name, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching .pdf and .txt files
    #[arg(required = true)]
    input: String,

    /// Output file (default: output.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<TableFormat>,

    /// Also append the rows to this SQLite database, after the output file is written
    #[arg(long)]
    db: Option<PathBuf>,

    /// Number of documents read concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableFormat {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
    /// JSON array of records
    Json,
}

impl From<TableFormat> for ExportFormat {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Xlsx => ExportFormat::Xlsx,
            TableFormat::Csv => ExportFormat::Csv,
            TableFormat::Json => ExportFormat::Json,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Text extraction runs on the blocking pool; `buffered` yields results in
    // input order.
    let reads: Vec<_> = stream::iter(files.iter().cloned())
        .map(|path| {
            let pdf_config = config.pdf.clone();
            let pb = pb.clone();
            async move {
                let name = display_name(&path);
                let text =
                    tokio::task::spawn_blocking(move || read_document_text(&path, &pdf_config))
                        .await?;
                pb.inc(1);
                Ok::<_, tokio::task::JoinError>((name, text))
            }
        })
        .buffered(args.jobs.max(1))
        .collect()
        .await;

    pb.finish_and_clear();

    let mut documents = Vec::with_capacity(reads.len());
    for (index, read) in reads.into_iter().enumerate() {
        let (name, text) = read?;
        match text {
            Ok(text) => documents.push(TextDocument::new(name, text)),
            Err(source) => {
                error!("Failed to read {}: {}", name, source);
                return Err(InvxError::Document { index, name, source }.into());
            }
        }
    }

    let mut batch = Batch::open();
    let aggregator = BatchAggregator::new(TemplateParser::from_config(&config.extraction));
    aggregator.run(&mut batch, documents)?;

    let missing: usize = batch
        .records()
        .iter()
        .map(|record| record.missing_fields().len())
        .sum();

    let format = args
        .format
        .map(ExportFormat::from)
        .unwrap_or(config.export.format);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("output.{}", format.extension())));

    let db_batch = args.db.as_ref().map(|_| batch.clone());

    let written = export_batch(batch, format, &output, &config.export)?;
    debug!("Exported {} rows as {:?}", written, format);

    eprintln!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        written,
        output.display()
    );

    // A failed table export leaves the database untouched.
    if let (Some(db_path), Some(db_batch)) = (&args.db, db_batch) {
        let appended = SqliteSink::from_config(db_path, &config.export).export(db_batch)?;
        eprintln!(
            "{} Appended {} rows to {}",
            style("✓").green(),
            appended,
            db_path.display()
        );
    }

    eprintln!(
        "{} Processed {} files in {:?}, {} fields missing",
        style("✓").green(),
        files.len(),
        start.elapsed(),
        style(missing).yellow()
    );

    Ok(())
}

fn export_batch(
    batch: Batch,
    format: ExportFormat,
    output: &Path,
    config: &ExportConfig,
) -> anyhow::Result<usize> {
    let mut sink: Box<dyn TabularSink> = match format {
        ExportFormat::Xlsx => Box::new(XlsxSink::from_config(output, config)),
        ExportFormat::Csv => Box::new(CsvSink::create(output)?),
        ExportFormat::Json => Box::new(JsonSink::create(output)?),
    };

    Ok(sink.export(batch)?)
}
