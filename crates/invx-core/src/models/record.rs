//! The field record produced for every invoice document.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::rules::dates::parse_date;

/// One of the eleven fields extracted from an invoice, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    CustomerName,
    PoNo,
    PoDate,
    OrderNo,
    OrderDate,
    DeliveryNoteNo,
    DeliveryDate,
    InvoiceNo,
    InvoiceDate,
    InvoiceValue,
    TermOfPayment,
}

impl FieldName {
    /// Every field, in the column order used by all sinks.
    pub const ALL: [FieldName; 11] = [
        FieldName::CustomerName,
        FieldName::PoNo,
        FieldName::PoDate,
        FieldName::OrderNo,
        FieldName::OrderDate,
        FieldName::DeliveryNoteNo,
        FieldName::DeliveryDate,
        FieldName::InvoiceNo,
        FieldName::InvoiceDate,
        FieldName::InvoiceValue,
        FieldName::TermOfPayment,
    ];

    /// Record key, also used as the header cell.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::CustomerName => "customer_name",
            FieldName::PoNo => "po_no",
            FieldName::PoDate => "po_date",
            FieldName::OrderNo => "order_no",
            FieldName::OrderDate => "order_date",
            FieldName::DeliveryNoteNo => "delivery_note_no",
            FieldName::DeliveryDate => "delivery_date",
            FieldName::InvoiceNo => "invoice_no",
            FieldName::InvoiceDate => "invoice_date",
            FieldName::InvoiceValue => "invoice_value",
            FieldName::TermOfPayment => "term_of_payment",
        }
    }

    /// Column name in the SQLite `invoices` table.
    pub fn column(&self) -> &'static str {
        match self {
            FieldName::CustomerName => "Customer",
            FieldName::PoNo => "Po_No",
            FieldName::PoDate => "Po_Date",
            FieldName::OrderNo => "Order_No",
            FieldName::OrderDate => "Order_Date",
            FieldName::DeliveryNoteNo => "Delivery_Note_No",
            FieldName::DeliveryDate => "Delivery_Date",
            FieldName::InvoiceNo => "Invoice_No",
            FieldName::InvoiceDate => "Invoice_Date",
            FieldName::InvoiceValue => "Invoice_Value",
            FieldName::TermOfPayment => "Term_of_Payment",
        }
    }

    /// Header row shared by every tabular sink.
    pub fn headers() -> [&'static str; 11] {
        Self::ALL.map(|f| f.as_str())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// `None` when the amount was missing or unparseable; never zero.
    Amount(Option<Decimal>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Amount(a) => a.is_none(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Amount(Some(amount)) => write!(f, "{:.2}", amount),
            FieldValue::Amount(None) => Ok(()),
        }
    }
}

/// Extracted invoice fields. Every field is always present; misses are
/// empty strings, or `None` for the amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Customer address block ending with the country line.
    pub customer_name: String,

    /// Purchase order number.
    pub po_no: String,

    /// Purchase order date, `/`-separated.
    pub po_date: String,

    /// Order confirmation number.
    pub order_no: String,

    /// Order confirmation date, `/`-separated.
    pub order_date: String,

    /// Delivery note number.
    pub delivery_note_no: String,

    /// Delivery date, `/`-separated.
    pub delivery_date: String,

    /// Invoice number.
    pub invoice_no: String,

    /// Invoice date, `/`-separated.
    pub invoice_date: String,

    /// Invoice total with exactly two fraction digits.
    pub invoice_value: Option<Decimal>,

    /// Payment terms as printed.
    pub term_of_payment: String,
}

/// Record dates parsed into calendar dates where the text allows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordDates {
    pub po_date: Option<NaiveDate>,
    pub order_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub invoice_date: Option<NaiveDate>,
}

impl FieldRecord {
    pub fn get(&self, field: FieldName) -> FieldValue {
        let text = match field {
            FieldName::CustomerName => &self.customer_name,
            FieldName::PoNo => &self.po_no,
            FieldName::PoDate => &self.po_date,
            FieldName::OrderNo => &self.order_no,
            FieldName::OrderDate => &self.order_date,
            FieldName::DeliveryNoteNo => &self.delivery_note_no,
            FieldName::DeliveryDate => &self.delivery_date,
            FieldName::InvoiceNo => &self.invoice_no,
            FieldName::InvoiceDate => &self.invoice_date,
            FieldName::TermOfPayment => &self.term_of_payment,
            FieldName::InvoiceValue => return FieldValue::Amount(self.invoice_value),
        };
        FieldValue::Text(text.clone())
    }

    /// Values in column order.
    pub fn values(&self) -> Vec<FieldValue> {
        FieldName::ALL.iter().map(|f| self.get(*f)).collect()
    }

    /// Fields that came out empty.
    pub fn missing_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == FieldName::ALL.len()
    }

    pub fn dates(&self) -> RecordDates {
        RecordDates {
            po_date: parse_date(&self.po_date),
            order_date: parse_date(&self.order_date),
            delivery_date: parse_date(&self.delivery_date),
            invoice_date: parse_date(&self.invoice_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_headers_in_fixed_order() {
        assert_eq!(
            FieldName::headers(),
            [
                "customer_name",
                "po_no",
                "po_date",
                "order_no",
                "order_date",
                "delivery_note_no",
                "delivery_date",
                "invoice_no",
                "invoice_date",
                "invoice_value",
                "term_of_payment",
            ]
        );
    }

    #[test]
    fn test_empty_record_reports_every_field_missing() {
        let record = FieldRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.values().len(), 11);
        assert_eq!(record.missing_fields(), FieldName::ALL.to_vec());
    }

    #[test]
    fn test_serialized_keys_follow_field_order() {
        let record = FieldRecord {
            invoice_no: "7001".to_string(),
            invoice_value: Some(Decimal::from_str("10.50").unwrap()),
            ..Default::default()
        };

        let text = serde_json::to_string(&record).unwrap();
        let positions: Vec<usize> = FieldName::headers()
            .iter()
            .map(|key| text.find(&format!("\"{}\":", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{}", text);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 11);
        assert_eq!(json["invoice_value"], "10.50");
        assert!(serde_json::to_value(FieldRecord::default()).unwrap()["invoice_value"].is_null());
    }

    #[test]
    fn test_amount_display() {
        let amount = FieldValue::Amount(Some(Decimal::from_str("1234.50").unwrap()));
        assert_eq!(amount.to_string(), "1234.50");
        assert_eq!(FieldValue::Amount(None).to_string(), "");
    }

    #[test]
    fn test_dates() {
        let record = FieldRecord {
            invoice_date: "10/01/2024".to_string(),
            order_date: "not a date".to_string(),
            ..Default::default()
        };

        let dates = record.dates();
        assert_eq!(dates.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(dates.order_date, None);
        assert_eq!(dates.po_date, None);
    }
}
