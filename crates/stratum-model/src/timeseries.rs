//! Time-series problem settings.

use serde::{Deserialize, Serialize};

/// Time-series configuration relevant to splitting.
///
/// When `is_timeseries` is set, row order encodes time and is never shuffled.
/// `group_by` names the columns identifying independent series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesSettings {
    pub is_timeseries: bool,
    pub group_by: Option<Vec<String>>,
    /// Column holding the time axis. Rows where it is null are dropped before splitting.
    pub order_by: Option<String>,
}

impl TimeSeriesSettings {
    /// Settings for a non time-series problem.
    pub fn none() -> Self {
        Self::default()
    }

    /// Settings for a single ungrouped series.
    pub fn series() -> Self {
        Self {
            is_timeseries: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    /// Group-by columns that take part in stratification.
    ///
    /// Empty unless this is a time-series problem with a non-empty `group_by`.
    pub fn stratification_groups(&self) -> &[String] {
        match &self.group_by {
            Some(columns) if self.is_timeseries => columns,
            _ => &[],
        }
    }
}
