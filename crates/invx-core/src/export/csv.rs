//! CSV sink.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{Result, TabularSink};
use crate::batch::Batch;
use crate::error::ExportError;
use crate::models::record::FieldName;

/// Writes the batch as comma-separated values.
pub struct CsvSink<W: Write> {
    writer: ::csv::Writer<W>,
}

impl CsvSink<File> {
    /// Create (or truncate) a CSV file.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: ::csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: ::csv::Writer::from_writer(writer),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}

impl<W: Write> TabularSink for CsvSink<W> {
    fn export(&mut self, batch: Batch) -> Result<usize> {
        self.writer.write_record(FieldName::headers())?;

        let mut written = 0;
        for row in batch.rows() {
            self.writer
                .write_record(row.iter().map(|value| value.to_string()))?;
            written += 1;
        }

        self.writer.flush()?;
        debug!("Wrote {} CSV rows", written);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_batch;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_export() {
        let mut sink = CsvSink::from_writer(Vec::new());
        let written = sink.export(sample_batch()).unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        assert_eq!(written, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "customer_name,po_no,po_date,order_no,order_date,delivery_note_no,delivery_date,invoice_no,invoice_date,invoice_value,term_of_payment"
        );
        assert_eq!(
            lines[1],
            "\"Acme Srl, Via Roma 1, 00100 Roma, ITALY\",4500012345,03/01/2024,998,05/01/2024,80012,08/01/2024,7001,10/01/2024,1234.50,60 days"
        );
        assert_eq!(lines[2], ",,,,,,,7002,,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.export(Batch::open()).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("customer_name,po_no,"));
        assert_eq!(content.lines().count(), 1);
    }
}
