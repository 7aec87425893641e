//! Group-balanced partitioning into unit subsets.
//!
//! Rows are grouped by the cartesian product of the stratification columns'
//! observed values. Each group is cut into `n` near-equal contiguous chunks and
//! every unit subset receives exactly one chunk of every group.

use std::collections::{BTreeMap, HashMap};

use polars::prelude::*;
use rand::RngCore;
use rand::seq::SliceRandom;
use stratum_common::{RowIndices, column_keys, split_evenly};

use crate::error::{Result, SplitError};

/// How a group's chunks are handed out to unit subsets.
pub enum ChunkAllocation<'a> {
    /// Chunk `i` goes to subset `i`.
    Sequential,
    /// Chunks go to subsets through a fresh random permutation per group.
    Shuffled(&'a mut dyn RngCore),
}

/// Rows sharing one combination of stratification values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// One value per stratification column; `None` is a null cell.
    pub key: Vec<Option<String>>,
    pub rows: RowIndices,
}

/// All non-empty groups of a dataset, built in a single pass over its rows.
///
/// Groups are ordered like the cartesian product of each column's distinct
/// values, taken in order of first appearance. Combinations that never occur
/// are absent.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<Group>,
}

impl GroupIndex {
    pub fn build(data: &DataFrame, columns: &[String]) -> Result<Self> {
        let rows = data.height();

        let mut keys_per_column = Vec::with_capacity(columns.len());
        for column in columns {
            let keys = column_keys(data, column).map_err(|_| SplitError::ColumnNotFound {
                column: column.clone(),
            })?;
            keys_per_column.push(keys);
        }

        // Rank of each distinct value per column, by first appearance.
        let mut distinct: Vec<Vec<Option<String>>> = vec![Vec::new(); columns.len()];
        let mut ranks: Vec<HashMap<Option<String>, usize>> = vec![HashMap::new(); columns.len()];
        let mut by_rank: BTreeMap<Vec<usize>, RowIndices> = BTreeMap::new();

        for row in 0..rows {
            let mut rank_key = Vec::with_capacity(columns.len());
            for (col, keys) in keys_per_column.iter().enumerate() {
                let value = &keys[row];
                let rank = match ranks[col].get(value) {
                    Some(&rank) => rank,
                    None => {
                        let rank = distinct[col].len();
                        ranks[col].insert(value.clone(), rank);
                        distinct[col].push(value.clone());
                        rank
                    }
                };
                rank_key.push(rank);
            }
            by_rank.entry(rank_key).or_default().push(row as IdxSize);
        }

        let groups = by_rank
            .into_iter()
            .map(|(rank_key, rows)| Group {
                key: rank_key
                    .iter()
                    .enumerate()
                    .map(|(col, &rank)| distinct[col][rank].clone())
                    .collect(),
                rows,
            })
            .collect();

        Ok(Self { groups })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

/// Partitions `data` into `n_subsets` group-balanced unit subsets of row indices.
///
/// Every subset holds a proportional slice of every observed group. Subset
/// sizes are not guaranteed to be equal when groups are small relative to
/// `n_subsets`; see [`crate::balance::validate`].
pub fn stratify(
    data: &DataFrame,
    n_subsets: usize,
    columns: &[String],
    allocation: &mut ChunkAllocation<'_>,
) -> Result<Vec<RowIndices>> {
    let index = GroupIndex::build(data, columns)?;
    tracing::debug!(
        groups = index.len(),
        subsets = n_subsets,
        columns = ?columns,
        "Stratifying rows"
    );
    Ok(allocate(&index, n_subsets, allocation))
}

/// Hands out each group's chunks to the unit subsets.
pub fn allocate(
    index: &GroupIndex,
    n_subsets: usize,
    allocation: &mut ChunkAllocation<'_>,
) -> Vec<RowIndices> {
    let mut subsets: Vec<RowIndices> = vec![Vec::new(); n_subsets];
    let mut order: Vec<usize> = (0..n_subsets).collect();

    for group in index.groups() {
        let chunks = split_evenly(&group.rows, n_subsets);
        match allocation {
            ChunkAllocation::Sequential => {
                for (subset, chunk) in subsets.iter_mut().zip(chunks) {
                    subset.extend(chunk);
                }
            }
            ChunkAllocation::Shuffled(rng) => {
                order.shuffle(&mut **rng);
                for (subset, &chunk) in subsets.iter_mut().zip(&order) {
                    subset.extend_from_slice(&chunks[chunk]);
                }
            }
        }
    }

    subsets
}
