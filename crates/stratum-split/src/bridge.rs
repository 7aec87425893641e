//! Glue between the cutoff split and stratification.
//!
//! Decides what to stratify on, recombines the cutoff partitions, cuts the
//! data into unit subsets and reassembles train/dev/test from them.

use polars::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stratum_common::{RowIndices, take_rows};
use stratum_model::{DtypeMap, SplitOptions, StratificationPlan, TimeSeriesSettings, UnitLayout};

use crate::balance;
use crate::cutoff::Partitions;
use crate::error::{Result, SplitError};
use crate::stratify::{ChunkAllocation, stratify};

/// Outcome of [`compute_stratified_split`].
#[derive(Debug, Clone)]
pub struct StratifiedSplit {
    pub partitions: Partitions,
    /// Columns the split was stratified on; empty when nothing was stratifiable.
    pub stratified_on: Vec<String>,
    /// Unit subset count, when stratification ran.
    pub subsets: Option<usize>,
    /// True when the balance check replaced the stratified subsets.
    pub fell_back: bool,
}

/// Replaces a cutoff split with a stratified reconstruction.
///
/// The target is stratified on when its dtype is categorical or binary, and
/// group-by columns are added for grouped time series. With nothing to
/// stratify on, `partitions` is returned unchanged.
pub fn compute_stratified_split(
    partitions: Partitions,
    target: &str,
    dtypes: &DtypeMap,
    tss: &TimeSeriesSettings,
    options: &SplitOptions,
) -> Result<StratifiedSplit> {
    let plan = StratificationPlan::resolve(target, dtypes, tss)?;
    if plan.is_empty() {
        tracing::debug!(column = %target, "Nothing to stratify on");
        return Ok(StratifiedSplit {
            partitions,
            stratified_on: Vec::new(),
            subsets: None,
            fell_back: false,
        });
    }

    for column in plan.columns() {
        if partitions.train.column(column).is_err() {
            return Err(SplitError::ColumnNotFound {
                column: column.clone(),
            });
        }
    }

    let layout = options.fractions.unit_layout()?;
    let data = partitions.combine()?;
    tracing::debug!(
        rows = data.height(),
        subsets = layout.subsets,
        stratified_on = ?plan.columns(),
        "Computing stratified split"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut allocation = if options.random_alloc {
        ChunkAllocation::Shuffled(&mut rng)
    } else {
        ChunkAllocation::Sequential
    };
    let subsets = stratify(&data, layout.subsets, plan.columns(), &mut allocation)?;
    let outcome = balance::validate(
        &data,
        subsets,
        layout.subsets,
        tss.is_timeseries,
        &options.balance,
    );

    Ok(StratifiedSplit {
        partitions: reassemble(&data, &outcome.subsets, &layout)?,
        stratified_on: plan.into_columns(),
        subsets: Some(layout.subsets),
        fell_back: outcome.fell_back,
    })
}

/// Concatenates consecutive unit subsets into train, dev and test.
pub fn reassemble(
    data: &DataFrame,
    subsets: &[RowIndices],
    layout: &UnitLayout,
) -> Result<Partitions> {
    let dev_start = layout.dev_start().min(subsets.len());
    let test_start = layout.test_start().min(subsets.len());

    Ok(Partitions {
        train: take_rows(data, &subsets[..dev_start].concat())?,
        dev: take_rows(data, &subsets[dev_start..test_start].concat())?,
        test: take_rows(data, &subsets[test_start..].concat())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_model::{Dtype, SplitFractions};

    use crate::cutoff::split_basic;

    fn labelled(rows: usize) -> DataFrame {
        let ids: Vec<i64> = (0..rows as i64).collect();
        let labels: Vec<&str> = (0..rows)
            .map(|i| if i % 2 == 0 { "even" } else { "odd" })
            .collect();
        let values: Vec<f64> = (0..rows).map(|i| i as f64).collect();
        df!("id" => ids, "label" => labels, "value" => values).expect("build frame")
    }

    #[test]
    fn test_non_stratifiable_target_is_passthrough() {
        let fractions = SplitFractions::new(0.6, 0.2, 0.2);
        let parts = split_basic(&labelled(20), &fractions, 1, false).expect("split");
        let before = parts.heights();
        let dtypes = DtypeMap::new().with("value", Dtype::Float);

        let result = compute_stratified_split(
            parts,
            "value",
            &dtypes,
            &TimeSeriesSettings::none(),
            &SplitOptions::new(fractions),
        )
        .expect("stratified split");
        assert!(result.stratified_on.is_empty());
        assert_eq!(result.subsets, None);
        assert_eq!(result.partitions.heights(), before);
    }

    #[test]
    fn test_stratifies_binary_target() {
        let fractions = SplitFractions::new(0.6, 0.2, 0.2);
        let parts = split_basic(&labelled(100), &fractions, 3, false).expect("split");
        let dtypes = DtypeMap::new().with("label", Dtype::Binary);

        let result = compute_stratified_split(
            parts,
            "label",
            &dtypes,
            &TimeSeriesSettings::none(),
            &SplitOptions::new(fractions),
        )
        .expect("stratified split");
        assert_eq!(result.stratified_on, vec!["label".to_string()]);
        assert_eq!(result.subsets, Some(5));
        assert!(!result.fell_back);
        assert_eq!(result.partitions.heights(), (60, 20, 20));
    }

    #[test]
    fn test_missing_group_column() {
        let fractions = SplitFractions::new(0.6, 0.2, 0.2);
        let parts = split_basic(&labelled(10), &fractions, 1, true).expect("split");
        let dtypes = DtypeMap::new().with("value", Dtype::Float);
        let tss = TimeSeriesSettings::series().with_group_by(["store"]);

        let err =
            compute_stratified_split(parts, "value", &dtypes, &tss, &SplitOptions::new(fractions))
                .unwrap_err();
        assert!(matches!(err, SplitError::ColumnNotFound { column } if column == "store"));
    }

    #[test]
    fn test_reassemble_uses_unit_counts() {
        let data = labelled(10);
        let subsets: Vec<RowIndices> =
            vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7], vec![8, 9]];
        let layout = SplitFractions::new(0.6, 0.2, 0.2).unit_layout().expect("layout");
        let parts = reassemble(&data, &subsets, &layout).expect("reassemble");
        assert_eq!(parts.heights(), (6, 2, 2));
    }
}
