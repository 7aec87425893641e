//! Provenance record of a finished split.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row counts and stratification outcome of a split, for audit logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub train_rows: usize,
    pub dev_rows: usize,
    pub test_rows: usize,
    pub stratified_on: Vec<String>,
    /// Unit subset count used for stratification, if any.
    pub subsets: Option<usize>,
    /// True when stratified subsets were replaced by a contiguous split.
    pub fell_back: bool,
}

impl SplitSummary {
    pub fn total_rows(&self) -> usize {
        self.train_rows + self.dev_rows + self.test_rows
    }

    pub fn is_stratified(&self) -> bool {
        !self.stratified_on.is_empty() && !self.fell_back
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train={} dev={} test={}",
            self.train_rows, self.dev_rows, self.test_rows
        )?;
        if self.stratified_on.is_empty() {
            return f.write_str(" unstratified");
        }
        write!(f, " stratified_on=[{}]", self.stratified_on.join(", "))?;
        if let Some(subsets) = self.subsets {
            write!(f, " subsets={subsets}")?;
        }
        if self.fell_back {
            f.write_str(" (fallback)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unstratified() {
        let summary = SplitSummary {
            train_rows: 8,
            dev_rows: 1,
            test_rows: 1,
            ..SplitSummary::default()
        };
        assert_eq!(summary.to_string(), "train=8 dev=1 test=1 unstratified");
        assert_eq!(summary.total_rows(), 10);
        assert!(!summary.is_stratified());
    }

    #[test]
    fn serializes_for_audit_log() {
        let summary = SplitSummary {
            train_rows: 6,
            dev_rows: 2,
            test_rows: 2,
            stratified_on: vec!["label".to_string()],
            subsets: Some(5),
            fell_back: false,
        };
        assert!(summary.is_stratified());
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["stratified_on"][0], "label");
        assert_eq!(json["subsets"], 5);
    }
}
