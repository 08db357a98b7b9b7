//! Template invoice parser assembling one field record per document.

use std::time::Instant;

use tracing::{debug, warn};

use crate::models::config::ExtractionConfig;
use crate::models::document::Document;
use crate::models::record::{FieldName, FieldRecord};

use super::rules::{
    normalize_date, parse_amount, BlockExtractor, FieldExtractor, LabelExtractor,
    MarkedAmountExtractor, PairExtractor, PrefixExtractor,
};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted field record, always complete.
    pub record: FieldRecord,
    /// Fields that could not be found or parsed.
    pub missing: Vec<FieldName>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
///
/// Parsing never fails: a field that cannot be found is left empty in the
/// record and listed in [`ExtractionResult::missing`].
pub trait InvoiceParser {
    /// Parse invoice fields from document lines.
    fn parse_lines(&self, lines: &[&str]) -> ExtractionResult;

    /// Parse invoice fields from a document.
    fn parse_document(&self, document: &Document<'_>) -> ExtractionResult {
        self.parse_lines(document.lines())
    }

    /// Parse invoice fields from raw text.
    fn parse(&self, text: &str) -> ExtractionResult {
        self.parse_document(&Document::from_text(text))
    }
}

/// Parser for the fixed invoice template: labeled lines, a customer block
/// closed by a country line and a marked invoice total.
#[derive(Debug, Clone)]
pub struct TemplateParser {
    customer: BlockExtractor,
    po_no: LabelExtractor,
    po_date: LabelExtractor,
    order: PairExtractor,
    delivery_note: PairExtractor,
    invoice: PairExtractor,
    term_of_payment: PrefixExtractor,
    invoice_value: MarkedAmountExtractor,
}

impl TemplateParser {
    /// Create a parser with the default template labels.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser with labels taken from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            customer: BlockExtractor::new(&config.customer_anchor, config.customer_block_lines),
            po_no: LabelExtractor::new(&config.po_no_label),
            po_date: LabelExtractor::new(&config.po_date_label),
            order: PairExtractor::new(&config.order_label),
            delivery_note: PairExtractor::new(&config.delivery_note_label),
            invoice: PairExtractor::new(&config.invoice_label),
            term_of_payment: PrefixExtractor::new(&config.term_of_payment_prefix),
            invoice_value: MarkedAmountExtractor::new(&config.invoice_value_marker),
        }
    }
}

impl Default for TemplateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for TemplateParser {
    fn parse_lines(&self, lines: &[&str]) -> ExtractionResult {
        let start = Instant::now();

        debug!("Parsing invoice from {} lines", lines.len());

        let customer_name = self.customer.extract(lines);
        let po_no = self.po_no.extract(lines);
        let po_date = normalize_date(&self.po_date.extract(lines));
        let (order_no, order_date) = self.order.extract(lines);
        let (delivery_note_no, delivery_date) = self.delivery_note.extract(lines);
        let (invoice_no, invoice_date) = self.invoice.extract(lines);
        let term_of_payment = self.term_of_payment.extract(lines);

        let raw_value = self.invoice_value.extract_raw(lines);
        let invoice_value = parse_amount(&raw_value);
        if invoice_value.is_none() && !raw_value.is_empty() {
            warn!("Invoice value {:?} is not a valid amount", raw_value);
        }

        let record = FieldRecord {
            customer_name,
            po_no,
            po_date,
            order_no,
            order_date: normalize_date(&order_date),
            delivery_note_no,
            delivery_date: normalize_date(&delivery_date),
            invoice_no,
            invoice_date: normalize_date(&invoice_date),
            invoice_value,
            term_of_payment,
        };

        let missing = record.missing_fields();
        if !missing.is_empty() {
            debug!(
                "Missing fields: {}",
                missing.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
            );
        }

        debug!(
            "Extracted invoice {:?} with {} of {} fields",
            record.invoice_no,
            FieldName::ALL.len() - missing.len(),
            FieldName::ALL.len()
        );

        ExtractionResult {
            record,
            missing,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE: &str = "\
ACME COMPONENTS S.p.A.
Invoice
Rossi Meccanica Srl
Via  Roma 1
00100 Roma
ITALY
PO / no: 4500012345
PO / date: 03.01.2024
Order no.: 998 / 05.01.2024
Deliv. note no.: 80012 / 08.01.2024
Invoice no.: 7001 / 10.01.2024
Pos. Description Qty Price
1 Widget 10 123,45
Sum of positions*   1.234,56
Term of payment: 60 days end of month
";

    #[test]
    fn test_parse_sample_invoice() {
        let parser = TemplateParser::new();
        let result = parser.parse(SAMPLE);

        assert_eq!(
            result.record,
            FieldRecord {
                customer_name: "Rossi Meccanica Srl, Via Roma 1, 00100 Roma, ITALY".to_string(),
                po_no: "4500012345".to_string(),
                po_date: "03/01/2024".to_string(),
                order_no: "998".to_string(),
                order_date: "05/01/2024".to_string(),
                delivery_note_no: "80012".to_string(),
                delivery_date: "08/01/2024".to_string(),
                invoice_no: "7001".to_string(),
                invoice_date: "10/01/2024".to_string(),
                invoice_value: Some(Decimal::from_str("1234.56").unwrap()),
                term_of_payment: "60 days end of month".to_string(),
            }
        );
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let text = SAMPLE.replace('\n', "\r\n");
        let result = TemplateParser::new().parse(&text);
        assert_eq!(result.record.invoice_no, "7001");
        assert_eq!(result.record.term_of_payment, "60 days end of month");
    }

    #[test]
    fn test_empty_document_yields_complete_record() {
        let result = TemplateParser::new().parse_lines(&[]);
        assert_eq!(result.record, FieldRecord::default());
        assert_eq!(result.record.values().len(), 11);
        assert_eq!(result.missing, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_unrecognized_document_yields_empty_record() {
        let result = TemplateParser::new().parse("Lorem ipsum\ndolor: sit / amet\n");
        assert!(result.record.is_empty());
    }

    #[test]
    fn test_fields_are_independent() {
        let text = "Invoice no.: 7001 / 10.01.2024\nSum of positions* n/a\n";
        let result = TemplateParser::new().parse(text);

        assert_eq!(result.record.invoice_no, "7001");
        assert_eq!(result.record.invoice_date, "10/01/2024");
        assert_eq!(result.record.customer_name, "");
        assert_eq!(result.record.invoice_value, None);
        assert!(result.missing.contains(&FieldName::CustomerName));
        assert!(result.missing.contains(&FieldName::InvoiceValue));
        assert!(!result.missing.contains(&FieldName::InvoiceNo));
    }

    #[test]
    fn test_custom_labels() {
        let config = ExtractionConfig {
            customer_anchor: "GERMANY".to_string(),
            customer_block_lines: 2,
            invoice_label: "Rechnung Nr.".to_string(),
            ..Default::default()
        };
        let text = "Muster GmbH\nGERMANY\nRechnung Nr.: R-1 / 01.02.2024\n";
        let result = TemplateParser::from_config(&config).parse(text);

        assert_eq!(result.record.customer_name, "Muster GmbH, GERMANY");
        assert_eq!(result.record.invoice_no, "R-1");
        assert_eq!(result.record.invoice_date, "01/02/2024");
    }
}
