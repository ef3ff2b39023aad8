//! Column-major table with an equal-length invariant.

use crate::error::{Result, TidyError};

use super::column::Column;
use super::value::{CellKey, Value};

/// An ordered sequence of named, equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let table = Self { columns };
        table.validate()?;
        Ok(table)
    }

    /// Create a text table from headers and row-major cells.
    ///
    /// Every row must have exactly one cell per header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let width = headers.len();
        let mut columns: Vec<Vec<Option<String>>> =
            (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(TidyError::RowWidth {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.push(cell);
            }
        }

        Ok(Self {
            columns: headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Column::text(name, values))
                .collect(),
        })
    }

    /// Check the equal-length invariant.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.columns.first() else {
            return Ok(());
        };
        let expected = first.len();
        match self.columns.iter().find(|c| c.len() != expected) {
            Some(bad) => Err(TidyError::ShapeMismatch {
                column: bad.name.clone(),
                expected,
                found: bad.len(),
            }),
            None => Ok(()),
        }
    }

    /// Get the number of rows. A table without columns has no rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Get a column by position.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get the first column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Value {
        self.columns
            .get(col)
            .map(|c| c.get(row))
            .unwrap_or(Value::Missing)
    }

    /// Owned copy of one row.
    pub fn row(&self, row: usize) -> Vec<Value> {
        self.columns.iter().map(|c| c.get(row)).collect()
    }

    /// Iterate over rows as owned values.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count()).map(move |row| self.row(row))
    }

    pub(crate) fn row_key(&self, row: usize) -> Vec<CellKey<'_>> {
        self.columns.iter().map(|c| c.data.key(row)).collect()
    }

    /// Whether every cell of the row is missing.
    pub fn is_row_missing(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c.data.is_missing(row))
    }

    /// Keep the rows whose position is `true` in `mask`.
    pub fn retain_rows(&mut self, mask: &[bool]) {
        for column in &mut self.columns {
            column.data.retain_mask(mask);
        }
    }

    /// Keep the columns matching the predicate, preserving order.
    pub fn retain_columns(&mut self, keep: impl FnMut(&Column) -> bool) {
        self.columns.retain(keep);
    }

    /// Append a column, which must match the current row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        let expected = self.row_count();
        let found = column.len();
        if !self.columns.is_empty() && found != expected {
            return Err(TidyError::ShapeMismatch {
                column: column.name,
                expected,
                found,
            });
        }
        self.columns.push(column);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnData;

    fn strs(cells: &[&str]) -> Vec<Option<String>> {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    #[test]
    fn test_from_rows_transposes() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![strs(&["1", "2"]), strs(&["3", "4"])],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get(1, 0), Value::Text("3".to_string()));
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_row() {
        let err = Table::from_rows(vec!["a".into(), "b".into()], vec![strs(&["1"])]).unwrap_err();
        assert!(matches!(err, TidyError::RowWidth { row: 0, expected: 2, found: 1 }));
    }

    #[test]
    fn test_new_rejects_mismatched_columns() {
        let err = Table::new(vec![
            Column::from_strs("a", &[Some("1"), Some("2")]),
            Column::from_strs("b", &[Some("1")]),
        ])
        .unwrap_err();

        assert!(err.is_invariant_violation());
        assert!(matches!(
            err,
            TidyError::ShapeMismatch { ref column, expected: 2, found: 1 } if column == "b"
        ));
    }

    #[test]
    fn test_push_column_checks_length() {
        let mut table = Table::new(vec![Column::from_strs("a", &[Some("1")])]).unwrap();
        assert!(table.push_column(Column::new("b", ColumnData::Boolean(vec![Some(true)]))).is_ok());
        let err = table
            .push_column(Column::new("c", ColumnData::Boolean(vec![])))
            .unwrap_err();
        assert!(matches!(
            err,
            TidyError::ShapeMismatch { ref column, expected: 1, found: 0 } if column == "c"
        ));
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let table = Table::default();
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
        assert!(table.validate().is_ok());
    }
}
