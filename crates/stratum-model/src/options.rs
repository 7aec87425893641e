//! Configuration options for splitting.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fractions::{SplitFractions, SumCheck};

/// What to do when stratified subsets come out uneven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceAction {
    /// Discard the stratified subsets and split contiguously instead.
    #[default]
    Fallback,
    /// Keep the stratified subsets and only log the imbalance.
    Keep,
}

/// Size-balance policy applied to stratified unit subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancePolicy {
    /// A subset shorter than `longest - len_threshold` rows is considered degenerate.
    pub len_threshold: usize,
    pub on_imbalance: ImbalanceAction,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            len_threshold: 2,
            on_imbalance: ImbalanceAction::Fallback,
        }
    }
}

impl BalancePolicy {
    pub fn new(len_threshold: usize) -> Self {
        Self {
            len_threshold,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: ImbalanceAction) -> Self {
        self.on_imbalance = action;
        self
    }
}

/// Options controlling a train/dev/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub fractions: SplitFractions,

    /// Seed for row shuffling and randomized chunk allocation.
    pub seed: u64,

    /// Assign each group's chunks to unit subsets through a random permutation
    /// instead of in order.
    pub random_alloc: bool,

    pub balance: BalancePolicy,

    pub sum_check: SumCheck,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            fractions: SplitFractions::default(),
            seed: 1,
            random_alloc: false,
            balance: BalancePolicy::default(),
            sum_check: SumCheck::Exact,
        }
    }
}

impl SplitOptions {
    pub fn new(fractions: SplitFractions) -> Self {
        Self {
            fractions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_random_alloc(mut self, enable: bool) -> Self {
        self.random_alloc = enable;
        self
    }

    #[must_use]
    pub fn with_balance(mut self, balance: BalancePolicy) -> Self {
        self.balance = balance;
        self
    }

    #[must_use]
    pub fn with_sum_check(mut self, check: SumCheck) -> Self {
        self.sum_check = check;
        self
    }

    /// Validates the fractions under the configured sum check.
    pub fn validate(&self) -> Result<()> {
        self.fractions.validate(self.sum_check)
    }

    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SplitOptions::default();
        assert_eq!(options.fractions, SplitFractions::new(0.8, 0.1, 0.1));
        assert_eq!(options.balance.len_threshold, 2);
        assert_eq!(options.balance.on_imbalance, ImbalanceAction::Fallback);
        assert_eq!(options.sum_check, SumCheck::Exact);
        assert!(!options.random_alloc);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let options = SplitOptions::from_json_str(
            r#"{
                "fractions": {"train": 0.6, "dev": 0.2, "test": 0.2},
                "seed": 7,
                "balance": {"on_imbalance": "keep"},
                "sum_check": {"tolerance": 1e-9}
            }"#,
        )
        .expect("parse options");

        assert_eq!(options.seed, 7);
        assert_eq!(options.fractions.train, 0.6);
        assert_eq!(options.balance.len_threshold, 2);
        assert_eq!(options.balance.on_imbalance, ImbalanceAction::Keep);
        assert_eq!(options.sum_check, SumCheck::Tolerance(1e-9));
    }

    #[test]
    fn json_round_trip_keeps_policy() {
        let options = SplitOptions::new(SplitFractions::new(0.5, 0.3, 0.2))
            .with_seed(99)
            .with_random_alloc(true)
            .with_balance(BalancePolicy::new(5).with_action(ImbalanceAction::Keep));
        let json = options.to_json_string().expect("serialize");
        let parsed = SplitOptions::from_json_str(&json).expect("parse");
        assert_eq!(parsed, options);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SplitOptions::from_json_str("{\"seed\": \"abc\"}").unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
