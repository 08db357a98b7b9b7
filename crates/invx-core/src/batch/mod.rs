//! Batch aggregation: one field record per document, in submission order.

mod source;

pub use source::{read_document_text, DocumentSource, FileDocument, TextDocument};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{InvxError, Result};
use crate::invoice::{InvoiceParser, TemplateParser};
use crate::models::record::{FieldRecord, FieldValue};

/// Records collected during one conversion run.
///
/// A batch is owned by the operation that opened it and is consumed when it
/// is exported or closed.
#[derive(Debug, Clone)]
pub struct Batch {
    opened_at: DateTime<Utc>,
    records: Vec<FieldRecord>,
}

impl Batch {
    /// Open an empty batch.
    pub fn open() -> Self {
        Self {
            opened_at: Utc::now(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: FieldRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    /// Data rows in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<FieldValue>> + '_ {
        self.records.iter().map(FieldRecord::values)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Close the batch and hand back its records.
    pub fn close(self) -> Vec<FieldRecord> {
        debug!(
            "Closing batch opened at {} with {} records",
            self.opened_at.to_rfc3339(),
            self.records.len()
        );
        self.records
    }
}

/// Runs an invoice parser over a sequence of documents.
pub struct BatchAggregator<P = TemplateParser> {
    parser: P,
}

impl<P: InvoiceParser> BatchAggregator<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse every document in order and append the records to `batch`.
    ///
    /// Documents are handled one at a time. If any document cannot be read,
    /// nothing is appended and the error names that document. Returns the
    /// number of records appended.
    pub fn run<I, D>(&self, batch: &mut Batch, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = D>,
        D: DocumentSource,
    {
        let mut records = Vec::new();

        for (index, document) in documents.into_iter().enumerate() {
            let text = document.read_text().map_err(|source| InvxError::Document {
                index,
                name: document.name().to_string(),
                source,
            })?;

            let result = self.parser.parse(&text);
            debug!(
                "Document #{} ({}): {} fields missing, {}ms",
                index,
                document.name(),
                result.missing.len(),
                result.processing_time_ms
            );
            records.push(result.record);
        }

        let count = records.len();
        for record in records {
            batch.push(record);
        }

        info!("Appended {} records to batch ({} total)", count, batch.len());
        Ok(count)
    }
}

impl Default for BatchAggregator<TemplateParser> {
    fn default() -> Self {
        Self::new(TemplateParser::new())
    }
}
