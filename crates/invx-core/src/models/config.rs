//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the invx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvxConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,
}

/// Labels and anchors of the invoice template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Label of the purchase order number line.
    pub po_no_label: String,

    /// Label of the purchase order date line.
    pub po_date_label: String,

    /// Label of the "number / date" order line.
    pub order_label: String,

    /// Label of the "number / date" delivery note line.
    pub delivery_note_label: String,

    /// Label of the "number / date" invoice line.
    pub invoice_label: String,

    /// Prefix of the payment terms line, colon included.
    pub term_of_payment_prefix: String,

    /// Exact line content closing the customer address block.
    pub customer_anchor: String,

    /// Number of lines in the customer block, anchor included.
    pub customer_block_lines: usize,

    /// Marker preceding the invoice total.
    pub invoice_value_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            po_no_label: "PO / no".to_string(),
            po_date_label: "PO / date".to_string(),
            order_label: "Order no.".to_string(),
            delivery_note_label: "Deliv. note no.".to_string(),
            invoice_label: "Invoice no.".to_string(),
            term_of_payment_prefix: "Term of payment:".to_string(),
            customer_anchor: "ITALY".to_string(),
            customer_block_lines: 4,
            invoice_value_marker: "Sum of positions*".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try an empty password on encrypted PDFs.
    pub decrypt_empty_password: bool,

    /// Minimum number of non-whitespace characters for a readable document.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            min_text_length: 1,
        }
    }
}

/// Output file format for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Tabular export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default output format.
    pub format: ExportFormat,

    /// Worksheet name for XLSX output.
    pub sheet_name: String,

    /// Column width for XLSX output.
    pub column_width: f64,

    /// Table name for SQLite output.
    pub table_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            sheet_name: "Data".to_string(),
            column_width: 30.0,
            table_name: "invoices".to_string(),
        }
    }
}

impl InvxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: InvxConfig =
            serde_json::from_str(r#"{"extraction": {"customer_anchor": "GERMANY"}, "export": {"format": "csv"}}"#)
                .unwrap();

        assert_eq!(config.extraction.customer_anchor, "GERMANY");
        assert_eq!(config.extraction.invoice_label, "Invoice no.");
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert_eq!(config.export.sheet_name, "Data");
        assert!(config.pdf.decrypt_empty_password);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvxConfig::default();
        config.extraction.customer_block_lines = 5;
        config.save(&path).unwrap();

        let loaded = InvxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.customer_block_lines, 5);
        assert_eq!(loaded.export.table_name, "invoices");
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = InvxConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
