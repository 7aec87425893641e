//! Stratified train/dev/test splitting of in-memory tabular data.
//!
//! # Overview
//!
//! A split runs in up to four stages:
//! - **Cutoff split** ([`split_basic`]): shuffle (unless time series) and cut rows
//!   at fraction boundaries
//! - **Stratification bridge** ([`compute_stratified_split`]): decide what to
//!   stratify on and rebuild train/dev/test from unit subsets
//! - **Stratifier** ([`stratify`]): cut every group into equal chunks, one per unit subset
//! - **Balance check** ([`balance::validate`]): fall back to a contiguous split
//!   when subsets come out too uneven
//!
//! # Example
//!
//! ```ignore
//! use stratum_model::{Dtype, DtypeMap, SplitFractions, SplitOptions, TimeSeriesSettings};
//! use stratum_split::split;
//!
//! let dtypes = DtypeMap::new().with("label", Dtype::Binary);
//! let options = SplitOptions::new(SplitFractions::new(0.6, 0.2, 0.2)).with_seed(7);
//! let result = split(&df, Some("label"), &dtypes, &TimeSeriesSettings::none(), &options)?;
//! println!("{}", result.summary());
//! ```
//!
//! All partitioning is done on row indices; row data is copied once per output
//! partition.

pub mod balance;
mod bridge;
mod cutoff;
mod error;
pub mod prepare;
mod stratify;

use polars::prelude::*;
use stratum_model::{DtypeMap, SplitOptions, SplitSummary, TimeSeriesSettings};

pub use bridge::{StratifiedSplit, compute_stratified_split, reassemble};
pub use cutoff::{Partitions, shuffled_rows, split_basic};
pub use error::{Result, SplitError};
pub use stratify::{ChunkAllocation, Group, GroupIndex, allocate, stratify};

/// Train, dev and test partitions plus the stratification that produced them.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub train: DataFrame,
    pub dev: DataFrame,
    pub test: DataFrame,
    /// Columns the split was stratified on. Empty if not stratified.
    pub stratified_on: Vec<String>,
    pub subsets: Option<usize>,
    /// True when stratification was attempted but discarded for balance.
    pub fell_back: bool,
}

impl SplitResult {
    fn from_partitions(partitions: Partitions) -> Self {
        Self {
            train: partitions.train,
            dev: partitions.dev,
            test: partitions.test,
            stratified_on: Vec::new(),
            subsets: None,
            fell_back: false,
        }
    }

    /// Provenance record of this split.
    pub fn summary(&self) -> SplitSummary {
        SplitSummary {
            train_rows: self.train.height(),
            dev_rows: self.dev.height(),
            test_rows: self.test.height(),
            stratified_on: self.stratified_on.clone(),
            subsets: self.subsets,
            fell_back: self.fell_back,
        }
    }
}

impl From<StratifiedSplit> for SplitResult {
    fn from(split: StratifiedSplit) -> Self {
        Self {
            stratified_on: split.stratified_on,
            subsets: split.subsets,
            fell_back: split.fell_back,
            ..Self::from_partitions(split.partitions)
        }
    }
}

/// Splits `data` into train, dev and test.
///
/// Fractions are checked first under `options.sum_check`. Rows are then cut
/// at fraction boundaries; when a `target` is given the cut is replaced by a
/// stratified reconstruction (see [`compute_stratified_split`]).
pub fn split(
    data: &DataFrame,
    target: Option<&str>,
    dtypes: &DtypeMap,
    tss: &TimeSeriesSettings,
    options: &SplitOptions,
) -> Result<SplitResult> {
    options.validate()?;
    if let Some(target) = target {
        prepare::require_columns(data, target, tss)?;
    }

    let partitions =
        cutoff::cutoff_split(data, &options.fractions, options.seed, tss.is_timeseries)?;

    let result: SplitResult = match target {
        Some(target) => {
            compute_stratified_split(partitions, target, dtypes, tss, options)?.into()
        }
        None => SplitResult::from_partitions(partitions),
    };

    tracing::info!(
        train = result.train.height(),
        dev = result.dev.height(),
        test = result.test.height(),
        stratified_on = ?result.stratified_on,
        fell_back = result.fell_back,
        "Split complete"
    );
    Ok(result)
}

/// Drops unusable rows, then [`split`]s.
///
/// Rows with a null target are removed, as are time-series rows with a null
/// order-by value.
pub fn prepare_and_split(
    data: &DataFrame,
    target: &str,
    dtypes: &DtypeMap,
    tss: &TimeSeriesSettings,
    options: &SplitOptions,
) -> Result<SplitResult> {
    options.validate()?;
    prepare::require_columns(data, target, tss)?;
    let data = prepare::drop_missing_order_by(data, tss)?;
    let data = prepare::drop_missing_targets(&data, target)?;
    split(&data, Some(target), dtypes, tss, options)
}
