//! Core library for template invoice field extraction.
//!
//! This crate provides:
//! - Label rules that pull fields out of line-oriented invoice text
//! - Italian-style amount and date conversion
//! - Record assembly and ordered batch aggregation
//! - PDF text extraction and tabular export (CSV, JSON, XLSX, SQLite)

pub mod batch;
pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use batch::{Batch, BatchAggregator, DocumentSource, FileDocument, TextDocument};
pub use error::{DocumentError, ExportError, InvxError, PdfError, Result};
pub use export::{CsvSink, JsonSink, MemorySink, SqliteSink, TabularSink, XlsxSink};
pub use invoice::{ExtractionResult, InvoiceParser, TemplateParser};
pub use models::config::InvxConfig;
pub use models::document::Document;
pub use models::record::{FieldName, FieldRecord, FieldValue};
pub use pdf::{PdfExtractor, PdfProcessor};
