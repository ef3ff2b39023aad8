//! Error types for the tidytab library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tidytab operations.
///
/// Per-value parse failures during type inference are never reported here;
/// they turn into missing values. Only decoding problems and structural
/// invariant violations reach the caller.
#[derive(Debug, Error)]
pub enum TidyError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no columns to clean.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns of a table do not share the same length.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row does not have one cell per header.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing cleaned output or reports.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl TidyError {
    /// Whether this error signals a broken table invariant rather than bad input bytes.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            TidyError::ShapeMismatch { .. } | TidyError::RowWidth { .. }
        )
    }
}

/// Result type alias for tidytab operations.
pub type Result<T> = std::result::Result<T, TidyError>;
