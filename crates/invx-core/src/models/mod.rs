//! Data models: input documents, the extracted field record and pipeline configuration.

pub mod config;
pub mod document;
pub mod record;

pub use config::{ExportConfig, ExportFormat, ExtractionConfig, InvxConfig, PdfConfig};
pub use document::Document;
pub use record::{FieldName, FieldRecord, FieldValue, RecordDates};
