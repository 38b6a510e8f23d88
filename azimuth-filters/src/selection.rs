//! Selection logic for a filter group.
//!
//! The selection itself belongs to the caller. Everything here derives states
//! from it or proposes a complete replacement set.

use std::collections::HashSet;

use crate::option::FilterOption;
use crate::pipeline::{Operator, is_disabled};

/// State of the group-level "select all" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Nothing selected.
    None,
    /// Some, but not exactly all selectable values are selected.
    Some,
    /// Exactly the selectable values are selected.
    All,
}

impl SelectAllState {
    /// Whether the control renders as checked.
    pub fn is_checked(self) -> bool {
        !matches!(self, SelectAllState::None)
    }

    /// Whether the control renders as indeterminate.
    pub fn is_indeterminate(self) -> bool {
        matches!(self, SelectAllState::Some)
    }
}

/// Derive the "select all" state from a selection and the selectable values.
///
/// Disabled values are not part of `selectable`, so they can never block the
/// `All` state.
pub fn select_all_state<S: AsRef<str>>(selected: &[S], selectable: &[&str]) -> SelectAllState {
    if selected.is_empty() {
        return SelectAllState::None;
    }
    let selected: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    let selectable: HashSet<&str> = selectable.iter().copied().collect();
    if selected == selectable {
        SelectAllState::All
    } else {
        SelectAllState::Some
    }
}

/// Selection controller for one group.
///
/// Works over the full option universe of the group, ignoring search and
/// pagination.
#[derive(Debug, Clone)]
pub struct SelectionController<'a> {
    universe: Vec<(&'a str, bool)>,
    selected: &'a [String],
}

impl<'a> SelectionController<'a> {
    /// Controller over `options` with disabled flags derived from `operator`.
    pub fn new(options: &'a [FilterOption], operator: Operator, selected: &'a [String]) -> Self {
        let universe = options
            .iter()
            .map(|option| (option.value.as_str(), is_disabled(option, operator)))
            .collect();
        Self { universe, selected }
    }

    /// Controller over explicit `(value, disabled)` pairs.
    pub fn from_flags(universe: Vec<(&'a str, bool)>, selected: &'a [String]) -> Self {
        Self { universe, selected }
    }

    /// Values that can be selected, in input order.
    pub fn selectable(&self) -> Vec<&'a str> {
        self.universe
            .iter()
            .filter(|(_, disabled)| !disabled)
            .map(|(value, _)| *value)
            .collect()
    }

    /// Current state of the "select all" control.
    pub fn state(&self) -> SelectAllState {
        select_all_state(self.selected, &self.selectable())
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|selected| selected == value)
    }

    pub fn is_disabled(&self, value: &str) -> bool {
        self.universe
            .iter()
            .any(|(candidate, disabled)| *candidate == value && *disabled)
    }

    /// New selection after activating the "select all" control.
    ///
    /// `None` selects every selectable value; `Some` and `All` clear.
    pub fn toggle_all(&self) -> Vec<String> {
        match self.state() {
            SelectAllState::None => self
                .selectable()
                .into_iter()
                .map(str::to_string)
                .collect(),
            SelectAllState::Some | SelectAllState::All => Vec::new(),
        }
    }

    /// New selection after activating one option.
    ///
    /// Returns `None` for disabled or unknown values: those never emit.
    pub fn toggle(&self, value: &str) -> Option<Vec<String>> {
        let known = self
            .universe
            .iter()
            .find(|(candidate, _)| *candidate == value)?;
        if known.1 {
            return None;
        }

        let mut next: Vec<String> = self
            .selected
            .iter()
            .filter(|selected| selected.as_str() != value)
            .cloned()
            .collect();
        if next.len() == self.selected.len() {
            next.push(value.to_string());
        }
        Some(next)
    }
}
