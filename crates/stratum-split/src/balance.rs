//! Size-balance check for stratified unit subsets.
//!
//! Rare group combinations can leave some subsets a few rows short. When the
//! gap exceeds the configured threshold the stratified subsets are replaced by
//! a plain contiguous partition.

use polars::prelude::*;
use stratum_common::{RowIndices, row_range, split_evenly};
use stratum_model::{BalancePolicy, ImbalanceAction};

/// Unit subsets after the balance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub subsets: Vec<RowIndices>,
    /// True when the stratified subsets were discarded.
    pub fell_back: bool,
}

/// Lengths of the given subsets.
pub fn subset_lengths(subsets: &[RowIndices]) -> Vec<usize> {
    subsets.iter().map(Vec::len).collect()
}

/// Returns true if some subset is shorter than `longest - len_threshold`.
pub fn is_imbalanced(subsets: &[RowIndices], len_threshold: usize) -> bool {
    let Some(max_len) = subsets.iter().map(Vec::len).max() else {
        return false;
    };
    let floor = max_len.saturating_sub(len_threshold);
    subsets.iter().any(|subset| subset.len() < floor)
}

/// Checks stratified `subsets` of `original` and falls back to a contiguous
/// split into `n_subsets` chunks when they are too uneven.
///
/// Time-series subsets are returned untouched: series lengths legitimately
/// differ between groups.
pub fn validate(
    original: &DataFrame,
    subsets: Vec<RowIndices>,
    n_subsets: usize,
    is_timeseries: bool,
    policy: &BalancePolicy,
) -> BalanceOutcome {
    if is_timeseries || !is_imbalanced(&subsets, policy.len_threshold) {
        return BalanceOutcome {
            subsets,
            fell_back: false,
        };
    }

    let lengths = subset_lengths(&subsets);
    match policy.on_imbalance {
        ImbalanceAction::Keep => {
            tracing::warn!(
                subset_lengths = ?lengths,
                threshold = policy.len_threshold,
                "Stratified subsets are uneven, keeping them"
            );
            BalanceOutcome {
                subsets,
                fell_back: false,
            }
        }
        ImbalanceAction::Fallback => {
            tracing::warn!(
                subset_lengths = ?lengths,
                threshold = policy.len_threshold,
                "Cannot stratify, splitting without stratification"
            );
            BalanceOutcome {
                subsets: split_evenly(&row_range(original.height()), n_subsets),
                fell_back: true,
            }
        }
    }
}
