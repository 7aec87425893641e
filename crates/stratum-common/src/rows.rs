//! Row-index lists and their materialization.
//!
//! Partitioning works on row positions only; row data is copied once, when a
//! partition is materialized with [`take_rows`].

use polars::prelude::*;

/// Ordered row positions into a DataFrame.
pub type RowIndices = Vec<IdxSize>;

/// Positions `0..len`.
pub fn row_range(len: usize) -> RowIndices {
    (0..len as IdxSize).collect()
}

/// Sizes of `parts` near-equal contiguous chunks covering `len` rows.
///
/// The first `len % parts` chunks get one extra row. Returns no chunks when
/// `parts` is zero.
pub fn chunk_sizes(len: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let remainder = len % parts;
    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Splits `rows` into `parts` contiguous chunks whose sizes differ by at most one.
pub fn split_evenly(rows: &[IdxSize], parts: usize) -> Vec<RowIndices> {
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for size in chunk_sizes(rows.len(), parts) {
        chunks.push(rows[start..start + size].to_vec());
        start += size;
    }
    chunks
}

/// Materializes the given rows of `df`, in the given order.
pub fn take_rows(df: &DataFrame, rows: &[IdxSize]) -> PolarsResult<DataFrame> {
    let idx = IdxCa::from_slice(PlSmallStr::from_static("row"), rows);
    df.take(&idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_sizes_front_loads_remainder() {
        assert_eq!(chunk_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(chunk_sizes(2, 5), vec![1, 1, 0, 0, 0]);
        assert_eq!(chunk_sizes(0, 4), vec![0, 0, 0, 0]);
        assert!(chunk_sizes(7, 0).is_empty());
    }

    #[test]
    fn test_split_evenly_is_contiguous() {
        let rows = row_range(7);
        let chunks = split_evenly(&rows, 3);
        assert_eq!(chunks, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_take_rows_preserves_order() {
        let df = df!("id" => [10i64, 11, 12, 13]).expect("build frame");
        let taken = take_rows(&df, &[3, 0, 2]).expect("take");
        let ids: Vec<i64> = taken
            .column("id")
            .expect("id column")
            .i64()
            .expect("i64 column")
            .into_no_null_iter()
            .collect();
        assert_eq!(ids, vec![13, 10, 12]);
    }

    #[test]
    fn test_take_rows_empty_keeps_schema() {
        let df = df!("id" => [1i64, 2], "label" => ["a", "b"]).expect("build frame");
        let taken = take_rows(&df, &[]).expect("take");
        assert_eq!(taken.height(), 0);
        assert_eq!(taken.width(), 2);
    }
}
