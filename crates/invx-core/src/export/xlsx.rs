//! XLSX sink.

use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use super::{Result, TabularSink};
use crate::batch::Batch;
use crate::models::config::ExportConfig;
use crate::models::record::{FieldName, FieldValue};

/// Writes the batch to a single-sheet workbook.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
    sheet_name: String,
    column_width: f64,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(path, &ExportConfig::default())
    }

    pub fn from_config(path: impl Into<PathBuf>, config: &ExportConfig) -> Self {
        Self {
            path: path.into(),
            sheet_name: config.sheet_name.clone(),
            column_width: config.column_width,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn build(&self, batch: &Batch) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let amount_format = Format::new().set_num_format("0.00");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, header) in FieldName::headers().iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, self.column_width)?;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
        }

        for (index, row) in batch.rows().enumerate() {
            let row_num = index as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                let col = col as u16;
                match value {
                    FieldValue::Text(text) if !text.is_empty() => {
                        worksheet.write_string(row_num, col, text.as_str())?;
                    }
                    FieldValue::Amount(Some(amount)) => match amount.to_f64() {
                        Some(number) => {
                            worksheet.write_number_with_format(row_num, col, number, &amount_format)?;
                        }
                        None => {
                            worksheet.write_string(row_num, col, value.to_string())?;
                        }
                    },
                    _ => {}
                }
            }
        }

        Ok(workbook)
    }

    /// Render the workbook in memory.
    pub fn to_buffer(&self, batch: &Batch) -> Result<Vec<u8>> {
        let mut workbook = self.build(batch)?;
        Ok(workbook.save_to_buffer()?)
    }
}

impl TabularSink for XlsxSink {
    fn export(&mut self, batch: Batch) -> Result<usize> {
        let mut workbook = self.build(&batch)?;
        workbook.save(&self.path)?;
        debug!("Wrote {} rows to {}", batch.len(), self.path.display());
        Ok(batch.len())
    }
}
