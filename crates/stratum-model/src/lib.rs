//! Data model for stratified train/dev/test splitting.
//!
//! This crate holds the types exchanged between the splitter and its collaborators:
//! - [`DtypeMap`]: semantic column types produced by external type inference
//! - [`TimeSeriesSettings`]: problem-level time-series configuration
//! - [`SplitFractions`] and [`SplitOptions`]: what to split and how
//! - [`StratificationPlan`]: the resolved stratification columns
//! - [`SplitSummary`]: a serializable provenance record of a finished split
//!
//! No DataFrame handling lives here; see `stratum-split` for the algorithms.

pub mod dtype;
pub mod error;
pub mod fractions;
pub mod options;
pub mod plan;
pub mod summary;
pub mod timeseries;

pub use dtype::{Dtype, DtypeMap};
pub use error::{ModelError, Result};
pub use fractions::{PERCENT_SCALE, SplitFractions, SumCheck, UnitLayout};
pub use options::{BalancePolicy, ImbalanceAction, SplitOptions};
pub use plan::StratificationPlan;
pub use summary::SplitSummary;
pub use timeseries::TimeSeriesSettings;
