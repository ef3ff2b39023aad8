//! The cleaning pipeline: structural fixes followed by type inference.

mod inference;
mod report;
mod structural;

pub use inference::{
    TypeInferenceEngine, meets_coverage, parse_boolean, parse_decimal, parse_timestamp,
};
pub use report::CleaningReport;
pub use structural::{StructuralNormalizer, standardize_column_name};
