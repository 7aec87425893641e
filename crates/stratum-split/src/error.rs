//! Error types for splitting.

use stratum_model::ModelError;
use thiserror::Error;

/// Errors that can occur while splitting a dataset.
///
/// Degenerate stratification is not an error; it is repaired by the balance
/// check and reported through the split result.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SplitError {
    /// Invalid fractions or options. Raised before any data is touched.
    #[error("configuration error: {0}")]
    Config(#[from] ModelError),

    /// A target or group-by column is missing from the dataset.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for split operations.
pub type Result<T> = std::result::Result<T, SplitError>;
