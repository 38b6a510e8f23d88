//! Dataset filter query assembled from filter group selections.
//!
//! The owning page keeps one `DatasetFilters` and writes each selector's
//! `on_change` output into the group it belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A filter group of the dataset query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterGroupKind {
    Label,
    Prediction,
    DataAction,
    Outcome,
    SmartTag,
}

impl FilterGroupKind {
    pub const ALL: [FilterGroupKind; 5] = [
        FilterGroupKind::Label,
        FilterGroupKind::Prediction,
        FilterGroupKind::DataAction,
        FilterGroupKind::Outcome,
        FilterGroupKind::SmartTag,
    ];

    /// Display label of the group, also its key in dataset files.
    pub const fn label(self) -> &'static str {
        match self {
            FilterGroupKind::Label => "label",
            FilterGroupKind::Prediction => "prediction",
            FilterGroupKind::DataAction => "dataAction",
            FilterGroupKind::Outcome => "outcome",
            FilterGroupKind::SmartTag => "smartTag",
        }
    }
}

impl fmt::Display for FilterGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterGroupKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterGroupKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::UnknownGroup(s.to_string()))
    }
}

/// Filters applied to the evaluated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetFilters {
    pub confidence_min: f64,
    pub confidence_max: f64,
    pub data_actions: Vec<String>,
    pub outcomes: Vec<String>,
    pub smart_tags: Vec<String>,
    pub labels: Vec<String>,
    pub predictions: Vec<String>,
    /// Utterances must contain this text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utterance: Option<String>,
}

impl Default for DatasetFilters {
    fn default() -> Self {
        Self {
            confidence_min: 0.0,
            confidence_max: 1.0,
            data_actions: Vec::new(),
            outcomes: Vec::new(),
            smart_tags: Vec::new(),
            labels: Vec::new(),
            predictions: Vec::new(),
            utterance: None,
        }
    }
}

impl DatasetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values of a group.
    pub fn selected(&self, kind: FilterGroupKind) -> &[String] {
        match kind {
            FilterGroupKind::Label => &self.labels,
            FilterGroupKind::Prediction => &self.predictions,
            FilterGroupKind::DataAction => &self.data_actions,
            FilterGroupKind::Outcome => &self.outcomes,
            FilterGroupKind::SmartTag => &self.smart_tags,
        }
    }

    /// Replace the selection of a group.
    pub fn set_group(&mut self, kind: FilterGroupKind, values: Vec<String>) {
        let slot = match kind {
            FilterGroupKind::Label => &mut self.labels,
            FilterGroupKind::Prediction => &mut self.predictions,
            FilterGroupKind::DataAction => &mut self.data_actions,
            FilterGroupKind::Outcome => &mut self.outcomes,
            FilterGroupKind::SmartTag => &mut self.smart_tags,
        };
        *slot = values;
    }

    /// Set the confidence range, clamped to `0.0..=1.0`.
    ///
    /// An inverted range is swapped.
    pub fn set_confidence(&mut self, min: f64, max: f64) {
        let min = min.clamp(0.0, 1.0);
        let max = max.clamp(0.0, 1.0);
        if min <= max {
            self.confidence_min = min;
            self.confidence_max = max;
        } else {
            self.confidence_min = max;
            self.confidence_max = min;
        }
    }

    /// Set the utterance text filter. Blank text clears it.
    pub fn set_utterance(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.utterance = if text.trim().is_empty() { None } else { Some(text) };
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.confidence_min <= 0.0
            && self.confidence_max >= 1.0
            && self.utterance.is_none()
            && FilterGroupKind::ALL
                .iter()
                .all(|kind| self.selected(*kind).is_empty())
    }

    /// Reset every filter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
