//! Main Cleaner struct and public API.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::clean::{CleaningReport, StructuralNormalizer, TypeInferenceEngine};
use crate::error::{Result, TidyError};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::table::Table;

/// Configuration for a cleaning run.
///
/// Only decoding is configurable; the cleaning steps and their thresholds are fixed.
#[derive(Debug, Clone, Default)]
pub struct CleanerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
}

/// Row and column counts around a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
}

/// Result of cleaning a decoded source.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// Metadata about the source.
    pub source: SourceMetadata,
    /// The cleaned table.
    pub table: Table,
    /// Every change the pipeline made.
    pub report: CleaningReport,
    pub summary: CleaningSummary,
}

/// Runs the structural normalizer and then type inference over one table.
pub struct Cleaner {
    parser: Parser,
    normalizer: StructuralNormalizer,
    inference: TypeInferenceEngine,
}

impl Cleaner {
    /// Create a new Cleaner with default configuration.
    pub fn new() -> Self {
        Self::with_config(CleanerConfig::default())
    }

    /// Create a Cleaner with custom configuration.
    pub fn with_config(config: CleanerConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            normalizer: StructuralNormalizer::new(),
            inference: TypeInferenceEngine::new(),
        }
    }

    /// Clean a table, returning the cleaned table and its report.
    ///
    /// Fails only when the table breaks the equal-length invariant; nothing
    /// is returned in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use tidytab::{Cleaner, Column, Table};
    ///
    /// let table = Table::new(vec![
    ///     Column::from_strs(" Age ", &[Some("31"), Some("31"), Some("40")]),
    /// ])?;
    /// let (cleaned, report) = Cleaner::new().clean(table)?;
    ///
    /// assert_eq!(report.duplicates_removed, 1);
    /// assert_eq!(report.new_columns, vec!["age"]);
    /// assert_eq!(report.numeric_converted, vec!["age"]);
    /// assert_eq!(cleaned.row_count(), 2);
    /// # Ok::<(), tidytab::TidyError>(())
    /// ```
    pub fn clean(&self, mut table: Table) -> Result<(Table, CleaningReport)> {
        table.validate()?;

        let mut report = CleaningReport::new();
        self.normalizer.normalize(&mut table, &mut report);
        self.inference.infer(&mut table, &mut report);

        Ok((table, report))
    }

    /// Decode and clean a file.
    pub fn clean_file(&self, path: impl AsRef<Path>) -> Result<CleaningResult> {
        let (table, source) = self.parser.parse_file(path)?;
        self.finish(table, source)
    }

    /// Decode and clean in-memory contents, such as an upload named `origin`.
    pub fn clean_bytes(&self, origin: impl AsRef<Path>, bytes: &[u8]) -> Result<CleaningResult> {
        let (table, source) = self.parser.parse_named(origin, bytes)?;
        self.finish(table, source)
    }

    /// Decode and clean everything readable from `reader`.
    pub fn clean_reader(
        &self,
        origin: impl AsRef<Path>,
        mut reader: impl Read,
    ) -> Result<CleaningResult> {
        let origin = origin.as_ref();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| TidyError::Io {
            path: origin.to_path_buf(),
            source: e,
        })?;
        self.clean_bytes(origin, &bytes)
    }

    fn finish(&self, table: Table, source: SourceMetadata) -> Result<CleaningResult> {
        let rows_before = table.row_count();
        let columns_before = table.column_count();

        let (table, report) = self.clean(table)?;

        let summary = CleaningSummary {
            rows_before,
            rows_after: table.row_count(),
            columns_before,
            columns_after: table.column_count(),
        };

        info!(
            file = %source.file,
            rows_before,
            rows_after = summary.rows_after,
            columns_after = summary.columns_after,
            duplicates = report.duplicates_removed,
            conversions = report.conversions(),
            "cleaned table"
        );

        Ok(CleaningResult {
            source,
            table,
            report,
            summary,
        })
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
