//! JSON sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Result, TabularSink};
use crate::batch::Batch;

/// Writes the batch as a pretty-printed JSON array of records.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::from_writer(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TabularSink for JsonSink<W> {
    fn export(&mut self, batch: Batch) -> Result<usize> {
        let records = batch.close();
        serde_json::to_writer_pretty(&mut self.writer, &records)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(records.len())
    }
}
