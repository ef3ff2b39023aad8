//! Cell values and column kinds.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The value domain a column currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free-form text, possibly mixed with missing markers.
    #[default]
    Text,
    /// Floating-point numbers.
    Numeric,
    /// Calendar timestamps without a time zone.
    Timestamp,
    /// Boolean flags.
    Boolean,
}

impl ColumnKind {
    /// Returns true if this column is still eligible for type inference.
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnKind::Text)
    }

    /// Get a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Numeric => "numeric",
            ColumnKind::Timestamp => "datetime",
            ColumnKind::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    /// The missing marker.
    Missing,
}

impl Value {
    /// Returns true for the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The column kind this value belongs to, `None` for missing.
    pub fn kind(&self) -> Option<ColumnKind> {
        match self {
            Value::Text(_) => Some(ColumnKind::Text),
            Value::Number(_) => Some(ColumnKind::Numeric),
            Value::Timestamp(_) => Some(ColumnKind::Timestamp),
            Value::Boolean(_) => Some(ColumnKind::Boolean),
            Value::Missing => None,
        }
    }

    /// Borrow the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// Hashable view of a cell used for row equality.
///
/// Numbers are keyed by bit pattern with NaN and negative zero folded, so
/// equal-looking rows collapse even when they carry NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Text(&'a str),
    Number(u64),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    Missing,
}

impl CellKey<'_> {
    pub(crate) fn number(n: f64) -> Self {
        let bits = if n.is_nan() {
            f64::NAN.to_bits()
        } else if n == 0.0 {
            0.0f64.to_bits()
        } else {
            n.to_bits()
        };
        CellKey::Number(bits)
    }
}
