//! Tidytab: deterministic cleaning for messy tabular data.
//!
//! A table goes through two fixed stages. The structural normalizer removes
//! duplicate rows, empty rows and empty columns, standardizes column names and
//! trims whitespace. Type inference then promotes text columns to numeric,
//! datetime or boolean when at least 80% of their cells parse.
//!
//! Every change is recorded in a [`CleaningReport`].
//!
//! # Example
//!
//! ```no_run
//! use tidytab::{Cleaner, Writer};
//!
//! let cleaner = Cleaner::new();
//! let result = cleaner.clean_file("survey.csv").unwrap();
//!
//! println!("Duplicates removed: {}", result.report.duplicates_removed);
//! Writer::new().to_path(&result.table, "survey_cleaned.csv").unwrap();
//! ```

pub mod clean;
pub mod error;
pub mod input;
pub mod output;
pub mod table;

mod cleaner;

pub use crate::cleaner::{Cleaner, CleanerConfig, CleaningResult, CleaningSummary};
pub use clean::CleaningReport;
pub use error::{Result, TidyError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use output::{Writer, WriterConfig};
pub use table::{Column, ColumnData, ColumnKind, Table, Value};
