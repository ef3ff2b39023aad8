//! In-memory table representation.

mod column;
mod table;
mod value;

pub use column::{Column, ColumnData};
pub use table::Table;
pub use value::{ColumnKind, Value};
