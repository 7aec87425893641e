//! Semantic column types.
//!
//! Types are assigned by an external inference step; the splitter only asks
//! whether a column can be stratified on.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Semantic type tag of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dtype {
    /// Two distinct values.
    Binary,
    /// A small set of unordered values.
    Categorical,
    Integer,
    Float,
    /// Number with a unit attached (e.g. "$10").
    Quantity,
    Date,
    Datetime,
    /// Multiple categorical labels per cell.
    Tags,
    ShortText,
    RichText,
    /// Column rejected by type inference.
    Invalid,
    /// Anything the splitter does not need to distinguish.
    Other,
}

impl Dtype {
    /// Returns true if rows can be stratified on a column of this type.
    pub fn is_stratifiable(self) -> bool {
        matches!(self, Dtype::Binary | Dtype::Categorical)
    }

    /// Returns true for numeric types.
    pub fn is_numeric(self) -> bool {
        matches!(self, Dtype::Integer | Dtype::Float | Dtype::Quantity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dtype::Binary => "binary",
            Dtype::Categorical => "categorical",
            Dtype::Integer => "integer",
            Dtype::Float => "float",
            Dtype::Quantity => "quantity",
            Dtype::Date => "date",
            Dtype::Datetime => "datetime",
            Dtype::Tags => "tags",
            Dtype::ShortText => "short_text",
            Dtype::RichText => "rich_text",
            Dtype::Invalid => "invalid",
            Dtype::Other => "other",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from column name to its semantic type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DtypeMap(BTreeMap<String, Dtype>);

impl DtypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, dtype: Dtype) -> Self {
        self.0.insert(column.into(), dtype);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, dtype: Dtype) -> Option<Dtype> {
        self.0.insert(column.into(), dtype)
    }

    pub fn get(&self, column: &str) -> Option<Dtype> {
        self.0.get(column).copied()
    }

    /// Looks up a column that must have been typed.
    pub fn require(&self, column: &str) -> Result<Dtype> {
        self.get(column).ok_or_else(|| ModelError::MissingDtype {
            column: column.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Dtype)> {
        self.0.iter().map(|(name, dtype)| (name.as_str(), *dtype))
    }
}

impl<S: Into<String>> FromIterator<(S, Dtype)> for DtypeMap {
    fn from_iter<I: IntoIterator<Item = (S, Dtype)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_categorical_and_binary_are_stratifiable() {
        assert!(Dtype::Binary.is_stratifiable());
        assert!(Dtype::Categorical.is_stratifiable());
        assert!(!Dtype::Integer.is_stratifiable());
        assert!(!Dtype::Float.is_stratifiable());
        assert!(!Dtype::Tags.is_stratifiable());
        assert!(!Dtype::Other.is_stratifiable());
    }

    #[test]
    fn dtype_map_deserializes_from_plain_object() {
        let map: DtypeMap =
            serde_json::from_str(r#"{"label": "binary", "price": "float", "notes": "rich_text"}"#)
                .expect("parse dtype map");
        assert_eq!(map.get("label"), Some(Dtype::Binary));
        assert_eq!(map.get("price"), Some(Dtype::Float));
        assert_eq!(map.get("notes"), Some(Dtype::RichText));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn require_reports_missing_column() {
        let map = DtypeMap::new().with("a", Dtype::Integer);
        let err = map.require("b").unwrap_err();
        assert_eq!(err.to_string(), "no dtype information for column 'b'");
    }

    #[test]
    fn display_matches_serde_name() {
        let json = serde_json::to_string(&Dtype::ShortText).expect("serialize");
        assert_eq!(json, format!("\"{}\"", Dtype::ShortText));
    }
}
