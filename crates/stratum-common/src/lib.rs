//! Shared Polars helpers for the stratum crates.

mod rows;
mod values;

pub use rows::{RowIndices, chunk_sizes, row_range, split_evenly, take_rows};
pub use values::{any_to_key, any_to_string, column_keys, format_numeric};
