//! SQLite sink.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::{Result, TabularSink};
use crate::batch::Batch;
use crate::models::config::ExportConfig;
use crate::models::record::{FieldName, FieldValue};

/// Appends the batch to a table in a SQLite database file.
///
/// The connection is opened for one export and closed when it returns.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
    table: String,
}

impl SqliteSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(path, &ExportConfig::default())
    }

    pub fn from_config(path: impl Into<PathBuf>, config: &ExportConfig) -> Self {
        Self {
            path: path.into(),
            table: config.table_name.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn quoted_table(&self) -> String {
        format!("\"{}\"", self.table.replace('"', "\"\""))
    }

    fn create_table_sql(&self) -> String {
        let columns: Vec<String> = FieldName::ALL
            .iter()
            .map(|field| {
                let kind = if *field == FieldName::InvoiceValue { "REAL" } else { "TEXT" };
                format!("{} {}", field.column(), kind)
            })
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY, {})",
            self.quoted_table(),
            columns.join(", ")
        )
    }

    fn insert_sql(&self) -> String {
        let columns: Vec<&str> = FieldName::ALL.iter().map(|f| f.column()).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quoted_table(),
            columns.join(", "),
            placeholders
        )
    }
}

fn sql_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::Text(text),
        FieldValue::Amount(Some(amount)) => amount.to_f64().map(Value::Real).unwrap_or(Value::Null),
        FieldValue::Amount(None) => Value::Null,
    }
}

impl TabularSink for SqliteSink {
    fn export(&mut self, batch: Batch) -> Result<usize> {
        let mut conn = Connection::open(&self.path)?;
        conn.execute_batch(&self.create_table_sql())?;

        let tx = conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(&self.insert_sql())?;
            for row in batch.rows() {
                stmt.execute(params_from_iter(row.into_iter().map(sql_value)))?;
                written += 1;
            }
        }
        tx.commit()?;

        debug!("Inserted {} rows into {} at {}", written, self.table, self.path.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::export::fixtures::sample_batch;

    #[test]
    fn test_sqlite_export_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.db");

        let mut sink = SqliteSink::new(&path);
        assert_eq!(sink.export(sample_batch()).unwrap(), 2);
        assert_eq!(sink.export(sample_batch()).unwrap(), 2);

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM invoices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 4);

        let (invoice_no, value): (String, Option<f64>) = conn
            .query_row(
                "SELECT Invoice_No, Invoice_Value FROM invoices ORDER BY id LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(invoice_no, "7001");
        assert_eq!(value, Some(1234.5));

        let missing: Option<f64> = conn
            .query_row(
                "SELECT Invoice_Value FROM invoices WHERE id = 2",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_table_name_is_quoted() {
        let config = ExportConfig {
            table_name: "odd\"name".to_string(),
            ..Default::default()
        };
        let sink = SqliteSink::from_config("unused.db", &config);
        assert!(sink.create_table_sql().starts_with("CREATE TABLE IF NOT EXISTS \"odd\"\"name\" (id INTEGER PRIMARY KEY, Customer TEXT"));
        assert!(sink.insert_sql().ends_with("VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"));
    }
}
