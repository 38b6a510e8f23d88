//! Option pipeline: search, sort and disable annotation.
//!
//! Turns the raw option list of a group into the ordered list a selector
//! displays. Each step is total and deterministic, and the caller's data is
//! only borrowed.

use std::fmt;
use std::str::FromStr;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::option::FilterOption;

/// How a group's selected values combine with the rest of the page filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    #[default]
    Or,
    And,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Or => f.write_str("OR"),
            Operator::And => f.write_str("AND"),
        }
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("or") {
            Ok(Operator::Or)
        } else if s.eq_ignore_ascii_case("and") {
            Ok(Operator::And)
        } else {
            Err(FilterError::UnknownOperator(s.to_string()))
        }
    }
}

/// How search text is matched against option values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Case-insensitive fuzzy subsequence match.
    Fuzzy,
}

/// Parameters of one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionQuery<'q> {
    pub search: &'q str,
    pub mode: SearchMode,
    pub operator: Operator,
    /// Selection cap hint. Has no effect on the pipeline under either operator.
    pub max_selectable: usize,
}

impl<'q> OptionQuery<'q> {
    /// Query with the given search text and default settings.
    pub fn new(search: &'q str) -> Self {
        Self {
            search,
            ..Self::default()
        }
    }

    /// Set the operator.
    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Set the search mode.
    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the selection cap hint.
    pub fn max_selectable(mut self, max: usize) -> Self {
        self.max_selectable = max;
        self
    }
}

/// An option annotated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedOption<'a> {
    pub option: &'a FilterOption,
    pub disabled: bool,
}

/// Whether an option must be offered as non-selectable.
///
/// Under `AND`, picking a value no item carries would make the combined
/// result permanently empty.
pub fn is_disabled(option: &FilterOption, operator: Operator) -> bool {
    operator == Operator::And && option.total_count == 0
}

/// Matches option values against search text.
pub struct SearchMatcher {
    needle: String,
    fuzzy: Option<(Matcher, Pattern)>,
}

impl SearchMatcher {
    /// Build a matcher for the given text and mode.
    pub fn new(search: &str, mode: SearchMode) -> Self {
        let fuzzy = match mode {
            SearchMode::Fuzzy if !search.is_empty() => Some((
                Matcher::new(Config::DEFAULT),
                Pattern::new(
                    search,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
            )),
            _ => None,
        };
        Self {
            needle: search.to_lowercase(),
            fuzzy,
        }
    }

    /// Whether `value` matches. Empty search text matches everything.
    pub fn matches(&mut self, value: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        match &mut self.fuzzy {
            Some((matcher, pattern)) => {
                let mut buf = Vec::new();
                let haystack = Utf32Str::new(value, &mut buf);
                pattern.score(haystack, matcher).is_some()
            }
            None => value.to_lowercase().contains(&self.needle),
        }
    }
}

/// Run the pipeline over a raw option list.
///
/// 1. keep options matching the search text,
/// 2. stable sort by total count, descending,
/// 3. annotate the disabled flag.
pub fn prepare_options<'a>(
    options: &'a [FilterOption],
    query: &OptionQuery<'_>,
) -> Vec<PreparedOption<'a>> {
    let mut matcher = SearchMatcher::new(query.search, query.mode);

    let mut prepared: Vec<PreparedOption<'a>> = options
        .iter()
        .filter(|option| matcher.matches(&option.value))
        .map(|option| PreparedOption {
            option,
            disabled: is_disabled(option, query.operator),
        })
        .collect();

    // `sort_by` is stable, equal totals keep their input order
    prepared.sort_by(|a, b| b.option.total_count.cmp(&a.option.total_count));

    prepared
}
