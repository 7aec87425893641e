//! Train/dev/test fractions and their decomposition into equal units.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Whole-percentage scale used for unit decomposition.
pub const PERCENT_SCALE: u64 = 100;

/// Slack allowed when converting a fraction to a whole percentage.
const PERCENT_EPSILON: f64 = 1e-6;

/// How strictly the fraction sum is compared against one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumCheck {
    /// Bit-exact `train + dev + test == 1.0`.
    ///
    /// Rejects some valid-looking inputs such as `(0.7, 0.2, 0.1)`, whose
    /// floating-point sum is `0.9999999999999999`.
    #[default]
    Exact,
    /// `|train + dev + test - 1| <= tolerance`.
    Tolerance(f64),
}

/// Target fractions of rows per partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub train: f64,
    pub dev: f64,
    pub test: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self::new(0.8, 0.1, 0.1)
    }
}

impl SplitFractions {
    pub const fn new(train: f64, dev: f64, test: f64) -> Self {
        Self { train, dev, test }
    }

    /// Sum in train, dev, test order.
    pub fn sum(&self) -> f64 {
        self.train + self.dev + self.test
    }

    /// Checks ranges and the fraction sum.
    pub fn validate(&self, check: SumCheck) -> Result<()> {
        for (name, value) in [("train", self.train), ("dev", self.dev), ("test", self.test)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ModelError::FractionOutOfRange { name, value });
            }
        }

        let sum = self.sum();
        let ok = match check {
            SumCheck::Exact => sum == 1.0,
            SumCheck::Tolerance(tolerance) => (sum - 1.0).abs() <= tolerance,
        };
        if ok {
            Ok(())
        } else {
            Err(ModelError::FractionSum {
                train: self.train,
                dev: self.dev,
                test: self.test,
                sum,
            })
        }
    }

    /// Row cutoffs `(train_end, dev_end)` for a sequence of `rows` rows.
    ///
    /// Each partition size is rounded independently (half to even), so the
    /// implied test size can be off by a row or two. Both cutoffs are clamped
    /// to `rows`.
    pub fn cutoffs(&self, rows: usize) -> (usize, usize) {
        let n = rows as f64;
        let train_end = ((n * self.train).round_ties_even() as usize).min(rows);
        let dev_len = (n * self.dev).round_ties_even() as usize;
        let dev_end = train_end.saturating_add(dev_len).min(rows);
        (train_end, dev_end)
    }

    /// Decomposes the fractions into equal unit subsets.
    ///
    /// Every fraction must be a whole percentage. The unit count is
    /// `100 / gcd(100, test%, train%, dev%)`.
    pub fn unit_layout(&self) -> Result<UnitLayout> {
        let train = to_percent(self.train)?;
        let dev = to_percent(self.dev)?;
        let test = to_percent(self.test)?;

        let gcd = gcd(PERCENT_SCALE, gcd(test, gcd(train, dev)));
        let subsets = PERCENT_SCALE / gcd;
        let layout = UnitLayout {
            subsets: subsets as usize,
            train_units: (train / gcd) as usize,
            dev_units: (dev / gcd) as usize,
            test_units: (test / gcd) as usize,
        };

        let units = (train + dev + test) / gcd;
        if units != subsets {
            return Err(ModelError::UnitMismatch { units, subsets });
        }
        Ok(layout)
    }
}

/// Number of unit subsets and how many of them each partition takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLayout {
    pub subsets: usize,
    pub train_units: usize,
    pub dev_units: usize,
    pub test_units: usize,
}

impl UnitLayout {
    /// Unit index where dev starts.
    pub fn dev_start(&self) -> usize {
        self.train_units
    }

    /// Unit index where test starts.
    pub fn test_start(&self) -> usize {
        self.train_units + self.dev_units
    }
}

fn to_percent(fraction: f64) -> Result<u64> {
    let scaled = fraction * PERCENT_SCALE as f64;
    let rounded = scaled.round();
    if (scaled - rounded).abs() > PERCENT_EPSILON || rounded < 0.0 {
        return Err(ModelError::NonIntegralPercentage { fraction });
    }
    Ok(rounded as u64)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
