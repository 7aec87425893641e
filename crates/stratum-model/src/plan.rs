//! Resolution of the columns to stratify on.

use serde::{Deserialize, Serialize};

use crate::dtype::DtypeMap;
use crate::error::Result;
use crate::timeseries::TimeSeriesSettings;

/// Ordered list of columns a split is stratified on. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StratificationPlan {
    columns: Vec<String>,
}

impl StratificationPlan {
    /// Resolves the plan for a target column.
    ///
    /// The target is included when its dtype is categorical or binary; the
    /// time-series group-by columns follow when the problem is a grouped
    /// time series. Fails if the target has no dtype entry.
    pub fn resolve(target: &str, dtypes: &DtypeMap, tss: &TimeSeriesSettings) -> Result<Self> {
        let mut columns = Vec::new();
        if dtypes.require(target)?.is_stratifiable() {
            columns.push(target.to_string());
        }
        for column in tss.stratification_groups() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        Ok(Self { columns })
    }

    pub fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}
