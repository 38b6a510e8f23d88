//! Prediction outcome categories.
//!
//! Every filter option carries one count per outcome kind. The set is closed:
//! a prediction is either correct or incorrect, and either predicted or
//! rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// One of the four correctness/rejection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The predicted class matches the label and is not the rejection class.
    CorrectAndPredicted,
    /// The predicted class and the label are the rejection class.
    CorrectAndRejected,
    /// The predicted class is the rejection class, but not the label.
    IncorrectAndRejected,
    /// The predicted class does not match the label and is not the rejection class.
    IncorrectAndPredicted,
}

impl OutcomeKind {
    /// All outcome kinds in domain order.
    pub const ALL: [OutcomeKind; 4] = [
        OutcomeKind::CorrectAndPredicted,
        OutcomeKind::CorrectAndRejected,
        OutcomeKind::IncorrectAndRejected,
        OutcomeKind::IncorrectAndPredicted,
    ];

    /// Wire name, as used for the keys of `outcomeCount` payloads.
    pub const fn name(self) -> &'static str {
        match self {
            OutcomeKind::CorrectAndPredicted => "CorrectAndPredicted",
            OutcomeKind::CorrectAndRejected => "CorrectAndRejected",
            OutcomeKind::IncorrectAndRejected => "IncorrectAndRejected",
            OutcomeKind::IncorrectAndPredicted => "IncorrectAndPredicted",
        }
    }

    /// Human readable name.
    pub const fn pretty_name(self) -> &'static str {
        match self {
            OutcomeKind::CorrectAndPredicted => "Correct & Predicted",
            OutcomeKind::CorrectAndRejected => "Correct & Rejected",
            OutcomeKind::IncorrectAndRejected => "Incorrect & Rejected",
            OutcomeKind::IncorrectAndPredicted => "Incorrect & Predicted",
        }
    }

    /// One-line explanation of the category.
    pub const fn description(self) -> &'static str {
        match self {
            OutcomeKind::CorrectAndPredicted => {
                "The predicted class matches the label and is not the rejection class."
            }
            OutcomeKind::CorrectAndRejected => {
                "The predicted class and the label are the rejection class."
            }
            OutcomeKind::IncorrectAndRejected => {
                "The predicted class is the rejection class, but not the label."
            }
            OutcomeKind::IncorrectAndPredicted => {
                "The predicted class does not match the label and is not the rejection class."
            }
        }
    }

    /// Whether the prediction was correct.
    pub const fn is_correct(self) -> bool {
        matches!(
            self,
            OutcomeKind::CorrectAndPredicted | OutcomeKind::CorrectAndRejected
        )
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutcomeKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutcomeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownOutcome(s.to_string()))
    }
}

/// Per-outcome counts for one filter option.
///
/// Serialized as an object keyed by outcome wire name. Missing keys read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutcomeCounts {
    pub correct_and_predicted: u64,
    pub correct_and_rejected: u64,
    pub incorrect_and_rejected: u64,
    pub incorrect_and_predicted: u64,
}

impl OutcomeCounts {
    /// Count for a single outcome kind.
    pub fn get(&self, kind: OutcomeKind) -> u64 {
        match kind {
            OutcomeKind::CorrectAndPredicted => self.correct_and_predicted,
            OutcomeKind::CorrectAndRejected => self.correct_and_rejected,
            OutcomeKind::IncorrectAndRejected => self.incorrect_and_rejected,
            OutcomeKind::IncorrectAndPredicted => self.incorrect_and_predicted,
        }
    }

    /// Builder-style setter for a single outcome kind.
    pub fn with(mut self, kind: OutcomeKind, count: u64) -> Self {
        let slot = match kind {
            OutcomeKind::CorrectAndPredicted => &mut self.correct_and_predicted,
            OutcomeKind::CorrectAndRejected => &mut self.correct_and_rejected,
            OutcomeKind::IncorrectAndRejected => &mut self.incorrect_and_rejected,
            OutcomeKind::IncorrectAndPredicted => &mut self.incorrect_and_predicted,
        };
        *slot = count;
        self
    }

    /// Sum over all outcome kinds.
    pub fn sum(&self) -> u64 {
        OutcomeKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_wire_names() {
        for kind in OutcomeKind::ALL {
            assert_eq!(kind.name().parse::<OutcomeKind>().unwrap(), kind);
        }
        assert!("Correct".parse::<OutcomeKind>().is_err());
    }

    #[test]
    fn test_counts_deserialize_with_missing_keys() {
        let counts: OutcomeCounts =
            serde_json::from_str(r#"{"CorrectAndPredicted": 3, "IncorrectAndRejected": 2}"#)
                .unwrap();
        assert_eq!(counts.get(OutcomeKind::CorrectAndPredicted), 3);
        assert_eq!(counts.get(OutcomeKind::CorrectAndRejected), 0);
        assert_eq!(counts.get(OutcomeKind::IncorrectAndRejected), 2);
        assert_eq!(counts.sum(), 5);
    }

    #[test]
    fn test_correctness() {
        assert!(OutcomeKind::CorrectAndRejected.is_correct());
        assert!(!OutcomeKind::IncorrectAndPredicted.is_correct());
    }
}
