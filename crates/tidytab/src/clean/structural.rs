//! Structural fixes: duplicates, empty rows and columns, names, whitespace.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::table::{ColumnData, Table};

use super::report::CleaningReport;

/// Runs of characters other than letters, digits and underscore.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Standardize a column name: trim, lower-case, collapse non-word runs to `_`.
///
/// ```
/// use tidytab::clean::standardize_column_name;
///
/// assert_eq!(standardize_column_name(" User ID! "), "user_id_");
/// ```
pub fn standardize_column_name(name: &str) -> String {
    NON_WORD
        .replace_all(&name.trim().to_lowercase(), "_")
        .into_owned()
}

/// Applies the structural fixes in their fixed order.
///
/// Every step runs even when an earlier one changed nothing, and every step
/// writes its report fields.
pub struct StructuralNormalizer;

impl StructuralNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `table` in place, filling the structural fields of `report`.
    pub fn normalize(&self, table: &mut Table, report: &mut CleaningReport) {
        report.duplicates_removed = self.remove_duplicates(table);
        debug!(removed = report.duplicates_removed, "duplicate rows");

        report.empty_rows_removed = self.remove_empty_rows(table);
        debug!(removed = report.empty_rows_removed, "empty rows");

        report.empty_columns_removed = self.remove_empty_columns(table);
        debug!(removed = report.empty_columns_removed, "empty columns");

        let (original, renamed) = self.standardize_names(table);
        report.column_names_standardized = true;
        report.original_columns = original;
        report.new_columns = renamed;
        debug!(columns = ?report.new_columns, "standardized column names");

        report.whitespace_trimmed = self.trim_whitespace(table);
        debug!(trimmed = report.whitespace_trimmed, "whitespace");
    }

    /// Drop rows identical to an earlier row, keeping the first occurrence.
    fn remove_duplicates(&self, table: &mut Table) -> usize {
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(table.row_count());
            (0..table.row_count())
                .map(|row| seen.insert(table.row_key(row)))
                .collect()
        };

        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            table.retain_rows(&keep);
        }
        removed
    }

    /// Drop rows whose every cell is missing.
    fn remove_empty_rows(&self, table: &mut Table) -> usize {
        let before = table.row_count();
        let keep: Vec<bool> = (0..before).map(|row| !table.is_row_missing(row)).collect();
        table.retain_rows(&keep);
        before - table.row_count()
    }

    /// Drop columns whose every cell is missing.
    fn remove_empty_columns(&self, table: &mut Table) -> usize {
        let before = table.column_count();
        table.retain_columns(|column| !column.is_fully_missing());
        before - table.column_count()
    }

    /// Rename every column, returning the names before and after.
    fn standardize_names(&self, table: &mut Table) -> (Vec<String>, Vec<String>) {
        let original = table.column_names();
        for column in table.columns_mut() {
            column.name = standardize_column_name(&column.name);
        }
        (original, table.column_names())
    }

    /// Strip surrounding whitespace from every text cell. Returns whether any
    /// text column existed.
    fn trim_whitespace(&self, table: &mut Table) -> bool {
        let mut any_text = false;
        for column in table.columns_mut() {
            if let ColumnData::Text(values) = &mut column.data {
                any_text = true;
                for value in values.iter_mut().flatten() {
                    let trimmed = value.trim();
                    if trimmed.len() != value.len() {
                        *value = trimmed.to_string();
                    }
                }
            }
        }
        any_text
    }
}

impl Default for StructuralNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
