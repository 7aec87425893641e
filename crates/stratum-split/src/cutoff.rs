//! Proportional cutoff splitting.
//!
//! Rows are optionally shuffled, then cut into three contiguous ranges whose
//! sizes follow the split fractions.

use polars::prelude::*;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use stratum_common::{RowIndices, row_range, take_rows};
use stratum_model::{SplitFractions, SumCheck};

use crate::error::Result;

/// Train, dev and test partitions of a dataset.
#[derive(Debug, Clone)]
pub struct Partitions {
    pub train: DataFrame,
    pub dev: DataFrame,
    pub test: DataFrame,
}

impl Partitions {
    /// Row counts as `(train, dev, test)`.
    pub fn heights(&self) -> (usize, usize, usize) {
        (self.train.height(), self.dev.height(), self.test.height())
    }

    pub fn total_rows(&self) -> usize {
        self.train.height() + self.dev.height() + self.test.height()
    }

    /// Stacks train, dev and test back into one frame, in that order.
    pub fn combine(&self) -> Result<DataFrame> {
        let mut data = self.train.clone();
        data.vstack_mut(&self.dev)?;
        data.vstack_mut(&self.test)?;
        Ok(data)
    }
}

/// Splits `data` into train/dev/test by cutting at fraction boundaries.
///
/// Non time-series rows are shuffled with a generator seeded from `seed`
/// first. Time-series rows keep their order so that later rows never end up
/// in an earlier partition. Fails when the fractions do not sum to exactly one.
pub fn split_basic(
    data: &DataFrame,
    fractions: &SplitFractions,
    seed: u64,
    is_timeseries: bool,
) -> Result<Partitions> {
    fractions.validate(SumCheck::Exact)?;
    cutoff_split(data, fractions, seed, is_timeseries)
}

/// [`split_basic`] without the fraction check.
pub(crate) fn cutoff_split(
    data: &DataFrame,
    fractions: &SplitFractions,
    seed: u64,
    is_timeseries: bool,
) -> Result<Partitions> {
    let rows = data.height();
    let (train_end, dev_end) = fractions.cutoffs(rows);

    if is_timeseries {
        return Ok(Partitions {
            train: data.slice(0, train_end),
            dev: data.slice(train_end as i64, dev_end - train_end),
            test: data.slice(dev_end as i64, rows - dev_end),
        });
    }

    let order = shuffled_rows(rows, seed);
    Ok(Partitions {
        train: take_rows(data, &order[..train_end])?,
        dev: take_rows(data, &order[train_end..dev_end])?,
        test: take_rows(data, &order[dev_end..])?,
    })
}

/// Deterministic permutation of `0..rows` keyed by `seed`.
pub fn shuffled_rows(rows: usize, seed: u64) -> RowIndices {
    let mut order = row_range(rows);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}
