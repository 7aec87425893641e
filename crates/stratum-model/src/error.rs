use thiserror::Error;

/// Errors raised while validating split configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A single fraction is outside `[0, 1]` or not finite.
    #[error("invalid {name} fraction {value}: must be within [0, 1]")]
    FractionOutOfRange { name: &'static str, value: f64 },

    /// The three fractions do not add up to one.
    #[error("train, dev and test fractions must sum to 1, got {train} + {dev} + {test} = {sum}")]
    FractionSum {
        train: f64,
        dev: f64,
        test: f64,
        sum: f64,
    },

    /// A fraction cannot be expressed as a whole percentage.
    #[error("fraction {fraction} is not a whole-number percentage")]
    NonIntegralPercentage { fraction: f64 },

    /// Unit counts derived from the fractions do not cover every subset.
    #[error("fraction units {units} do not add up to {subsets} subsets")]
    UnitMismatch { units: u64, subsets: u64 },

    /// A column requested for stratification has no dtype entry.
    #[error("no dtype information for column '{column}'")]
    MissingDtype { column: String },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
