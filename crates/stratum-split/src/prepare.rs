//! Row and column checks run before splitting.

use polars::prelude::*;
use stratum_model::TimeSeriesSettings;

use crate::error::{Result, SplitError};

/// Ensures the target and every stratification group-by column exist.
pub fn require_columns(data: &DataFrame, target: &str, tss: &TimeSeriesSettings) -> Result<()> {
    let groups = tss.stratification_groups().iter().map(String::as_str);
    for column in std::iter::once(target).chain(groups) {
        if data.column(column).is_err() {
            return Err(SplitError::ColumnNotFound {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Drops rows whose target is null; they cannot be trained on.
pub fn drop_missing_targets(data: &DataFrame, target: &str) -> Result<DataFrame> {
    drop_nulls_in(data, target, "target")
}

/// Drops rows with a null order-by value in time-series problems.
///
/// Returns the data unchanged for non time-series problems or when no
/// order-by column is configured.
pub fn drop_missing_order_by(data: &DataFrame, tss: &TimeSeriesSettings) -> Result<DataFrame> {
    match &tss.order_by {
        Some(order_by) if tss.is_timeseries => drop_nulls_in(data, order_by, "order_by"),
        _ => Ok(data.clone()),
    }
}

fn drop_nulls_in(data: &DataFrame, column: &str, role: &str) -> Result<DataFrame> {
    let series = data.column(column).map_err(|_| SplitError::ColumnNotFound {
        column: column.to_string(),
    })?;

    let removed = series.null_count();
    if removed == 0 {
        return Ok(data.clone());
    }

    tracing::warn!(
        column = %column,
        role,
        removed,
        "Removed rows with missing values"
    );
    let mask = series.is_not_null();
    Ok(data.filter(&mask)?)
}
