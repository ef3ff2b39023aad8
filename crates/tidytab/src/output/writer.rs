//! Delimited-text encoder for cleaned tables.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{Result, TidyError};
use crate::table::{ColumnData, Table};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATETIME_FRACTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Configuration for the writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Writes a table as delimited text: a header row, then one record per row.
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    /// Create a writer with default configuration.
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write `table` to a file, creating parent directories as needed.
    pub fn to_path(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    TidyError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| TidyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.to_writer(table, BufWriter::new(file))
    }

    /// Write `table` to any byte sink.
    ///
    /// A table without columns encodes to an empty body, not an empty header line.
    pub fn to_writer<W: Write>(&self, table: &Table, sink: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .from_writer(sink);

        if table.column_count() > 0 {
            writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
        }

        let formatters: Vec<CellFormatter<'_>> = table
            .columns()
            .iter()
            .map(|c| CellFormatter::for_column(&c.data))
            .collect();

        let mut record = Vec::with_capacity(formatters.len());
        for row in 0..table.row_count() {
            record.clear();
            record.extend(formatters.iter().map(|f| f.format(row)));
            writer.write_record(&record)?;
        }

        writer.flush().map_err(|e| {
            TidyError::Persistence(format!("Failed to flush output: {}", e))
        })?;
        Ok(())
    }

    /// Encode `table` into an in-memory buffer.
    pub fn to_bytes(&self, table: &Table) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.to_writer(table, &mut buffer)?;
        Ok(buffer)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the cells of one column. Timestamp layout is chosen once per column.
struct CellFormatter<'a> {
    data: &'a ColumnData,
    timestamp_format: &'static str,
}

impl<'a> CellFormatter<'a> {
    fn for_column(data: &'a ColumnData) -> Self {
        let timestamp_format = match data {
            ColumnData::Timestamp(values) => timestamp_format(values),
            _ => DATETIME_FORMAT,
        };
        Self {
            data,
            timestamp_format,
        }
    }

    fn format(&self, row: usize) -> String {
        match self.data {
            ColumnData::Text(v) => v.get(row).cloned().flatten().unwrap_or_default(),
            ColumnData::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|n| n.to_string())
                .unwrap_or_default(),
            ColumnData::Timestamp(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|t| t.format(self.timestamp_format).to_string())
                .unwrap_or_default(),
            ColumnData::Boolean(v) => match v.get(row).copied().flatten() {
                Some(true) => "True".to_string(),
                Some(false) => "False".to_string(),
                None => String::new(),
            },
        }
    }
}

fn timestamp_format(values: &[Option<NaiveDateTime>]) -> &'static str {
    let present = || values.iter().flatten();

    if present().all(|t| t.num_seconds_from_midnight() == 0 && t.nanosecond() == 0) {
        DATE_FORMAT
    } else if present().any(|t| t.nanosecond() != 0) {
        DATETIME_FRACTION_FORMAT
    } else {
        DATETIME_FORMAT
    }
}
