//! Filterable values and their outcome statistics.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::outcome::{OutcomeCounts, OutcomeKind};

/// One selectable filter value.
///
/// `value` is unique within a single selector. `total_count` is supplied
/// independently of `outcome_counts` and is not required to equal their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    #[serde(rename = "filterValue")]
    pub value: String,
    #[serde(rename = "outcomeCount", default)]
    pub outcome_counts: OutcomeCounts,
    #[serde(rename = "utteranceCount")]
    pub total_count: u64,
}

impl FilterOption {
    /// Create an option with no counts.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            outcome_counts: OutcomeCounts::default(),
            total_count: 0,
        }
    }

    /// Create an option whose total is the sum of the given counts.
    pub fn from_counts(value: impl Into<String>, counts: OutcomeCounts) -> Self {
        Self {
            value: value.into(),
            total_count: counts.sum(),
            outcome_counts: counts,
        }
    }

    /// Set the count for one outcome kind. The total is left untouched.
    pub fn with_count(mut self, kind: OutcomeKind, count: u64) -> Self {
        self.outcome_counts = self.outcome_counts.with(kind, count);
        self
    }

    /// Set the total count.
    pub fn with_total(mut self, total: u64) -> Self {
        self.total_count = total;
        self
    }
}

/// Decode a JSON array of options.
pub fn parse_options(json: &str) -> Result<Vec<FilterOption>, FilterError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode options from an already parsed JSON value.
pub fn options_from_value(value: serde_json::Value) -> Result<Vec<FilterOption>, FilterError> {
    Ok(serde_json::from_value(value)?)
}
