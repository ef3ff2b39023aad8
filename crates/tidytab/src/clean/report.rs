//! The cleaning report returned alongside the cleaned table.

use serde::{Deserialize, Serialize};

use crate::table::ColumnKind;

/// Record of every change the pipeline made.
///
/// Fields serialize in declaration order, which is the order the pipeline
/// fills them in. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows dropped because an earlier row had identical cells.
    pub duplicates_removed: usize,
    /// Rows dropped because every cell was missing.
    pub empty_rows_removed: usize,
    /// Columns dropped because every cell was missing.
    pub empty_columns_removed: usize,
    /// Always true once the normalizer has run.
    pub column_names_standardized: bool,
    /// Column names before standardization (after empty-column removal).
    pub original_columns: Vec<String>,
    /// Column names after standardization, positionally aligned with `original_columns`.
    pub new_columns: Vec<String>,
    /// Whether at least one text column was trimmed.
    pub whitespace_trimmed: bool,
    pub numeric_converted: Vec<String>,
    pub datetime_converted: Vec<String>,
    pub boolean_converted: Vec<String>,
}

impl CleaningReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful promotion of `column` to `kind`.
    pub(crate) fn record_conversion(&mut self, column: &str, kind: ColumnKind) {
        let list = match kind {
            ColumnKind::Numeric => &mut self.numeric_converted,
            ColumnKind::Timestamp => &mut self.datetime_converted,
            ColumnKind::Boolean => &mut self.boolean_converted,
            ColumnKind::Text => return,
        };
        list.push(column.to_string());
    }

    /// Total number of columns promoted to a more specific type.
    pub fn conversions(&self) -> usize {
        self.numeric_converted.len() + self.datetime_converted.len() + self.boolean_converted.len()
    }

    /// Total number of rows removed by the structural steps.
    pub fn rows_removed(&self) -> usize {
        self.duplicates_removed + self.empty_rows_removed
    }

    /// Columns whose name changed during standardization, as `(before, after)` pairs.
    pub fn renamed_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.original_columns
            .iter()
            .zip(&self.new_columns)
            .filter(|(before, after)| before != after)
            .map(|(before, after)| (before.as_str(), after.as_str()))
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
