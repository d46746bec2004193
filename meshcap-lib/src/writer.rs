//! CSV output of flattened records.
use std::io::Write;

use crate::record::{FlatRecord, Record};
use crate::Result;

/// Writes [FlatRecord] rows under a single header row.
///
/// The header is written on construction, so an empty run still produces a valid
/// file.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> RecordWriter<W> {
    /// # Errors
    /// If writing the header fails.
    pub fn new(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        inner.write_record(FlatRecord::COLUMNS)?;
        Ok(RecordWriter { inner, rows: 0 })
    }

    /// # Errors
    /// If serialization or the underlying write fails.
    pub fn write_flat(&mut self, flat: &FlatRecord) -> Result<()> {
        self.inner.serialize(flat)?;
        self.rows += 1;
        Ok(())
    }

    /// Flatten and write a record.
    ///
    /// # Errors
    /// If serialization or the underlying write fails.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        self.write_flat(&record.flatten())
    }

    /// Number of data rows written.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and return the underlying writer.
    ///
    /// # Errors
    /// If the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|err| crate::Error::Io(err.into_error()))
    }
}
