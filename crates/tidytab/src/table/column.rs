//! Typed columns.

use chrono::NaiveDateTime;

use super::value::{CellKey, ColumnKind, Value};

/// The values of a column, holding exactly one value domain at a time.
///
/// `None` is the missing marker in every variant. Promotion from text to a
/// more specific domain replaces the whole variant; there is no implicit
/// coercion between variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Numeric(Vec<Option<f64>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
    Boolean(Vec<Option<bool>>),
}

impl ColumnData {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Timestamp(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value domain of this column.
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Timestamp(_) => ColumnKind::Timestamp,
            ColumnData::Boolean(_) => ColumnKind::Boolean,
        }
    }

    /// Whether the cell at `row` is missing. Out-of-range rows count as missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Text(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Numeric(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Timestamp(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Boolean(v) => v.get(row).is_none_or(Option::is_none),
        }
    }

    /// Number of non-missing cells.
    pub fn present_count(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.iter().flatten().count(),
            ColumnData::Numeric(v) => v.iter().flatten().count(),
            ColumnData::Timestamp(v) => v.iter().flatten().count(),
            ColumnData::Boolean(v) => v.iter().flatten().count(),
        }
    }

    /// Owned copy of the cell at `row`.
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Text(v) => v.get(row).cloned().flatten().map(Value::Text),
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(Value::Number),
            ColumnData::Timestamp(v) => v.get(row).copied().flatten().map(Value::Timestamp),
            ColumnData::Boolean(v) => v.get(row).copied().flatten().map(Value::Boolean),
        }
        .unwrap_or(Value::Missing)
    }

    pub(crate) fn key(&self, row: usize) -> CellKey<'_> {
        match self {
            ColumnData::Text(v) => v
                .get(row)
                .and_then(|c| c.as_deref())
                .map(CellKey::Text),
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(CellKey::number),
            ColumnData::Timestamp(v) => v.get(row).copied().flatten().map(CellKey::Timestamp),
            ColumnData::Boolean(v) => v.get(row).copied().flatten().map(CellKey::Boolean),
        }
        .unwrap_or(CellKey::Missing)
    }

    /// Keep only the cells whose position is `true` in `mask`.
    pub(crate) fn retain_mask(&mut self, mask: &[bool]) {
        match self {
            ColumnData::Text(v) => retain_by_mask(v, mask),
            ColumnData::Numeric(v) => retain_by_mask(v, mask),
            ColumnData::Timestamp(v) => retain_by_mask(v, mask),
            ColumnData::Boolean(v) => retain_by_mask(v, mask),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, mask: &[bool]) {
    let mut keep = mask.iter().copied();
    values.retain(|_| keep.next().unwrap_or(true));
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column values.
    pub data: ColumnData,
}

impl Column {
    /// Create a column from a name and its data.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a text column.
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    /// Create a text column from borrowed cells, `None` being missing.
    pub fn from_strs(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::text(
            name,
            values.iter().map(|v| v.map(str::to_string)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    /// Owned copy of the cell at `row`.
    pub fn get(&self, row: usize) -> Value {
        self.data.value(row)
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        self.len() - self.data.present_count()
    }

    /// Whether every cell is missing (vacuously true for a zero-length column).
    pub fn is_fully_missing(&self) -> bool {
        self.data.present_count() == 0
    }

    /// Borrow the text cells, if this column is still text.
    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Iterate over all cells as owned values.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |row| self.get(row))
    }
}
