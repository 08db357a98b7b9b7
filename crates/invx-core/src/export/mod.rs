//! Tabular export of a finished batch.
//!
//! Every sink writes the same table: a header row with the field names in
//! fixed order, then one row per record in batch order.

mod csv;
mod json;
mod sqlite;
mod xlsx;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::sqlite::SqliteSink;
pub use self::xlsx::XlsxSink;

use crate::batch::Batch;
use crate::error::ExportError;
use crate::models::record::{FieldName, FieldValue};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Destination for a batch of records.
pub trait TabularSink {
    /// Write the whole batch. The batch is consumed; returns the number of data rows written.
    fn export(&mut self, batch: Batch) -> Result<usize>;
}

/// Sink that keeps the table in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub header: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabularSink for MemorySink {
    fn export(&mut self, batch: Batch) -> Result<usize> {
        self.header = FieldName::headers().iter().map(|h| h.to_string()).collect();
        self.rows = batch.rows().collect();
        Ok(self.rows.len())
    }
}
