//! View model of a FilterSelector.
//!
//! Rebuilt from props on every render. Renderers read it; nothing writes it.

use crate::distribution::{Segment, distribution};
use crate::pagination::ROW_HEIGHT;
use crate::selection::{SelectAllState, SelectionController};

use super::{FilterSelector, FilterSelectorProps};

/// The group-level "select all" control.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectAllControl {
    pub label: String,
    pub state: SelectAllState,
}

/// One visible option row.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    pub value: String,
    pub total_count: u64,
    pub checked: bool,
    pub disabled: bool,
    pub distribution: [Segment; 4],
}

/// Everything a renderer needs to draw one filter group.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroupView {
    pub id: String,
    pub label: String,
    /// Absent when the operator does not allow selecting every value.
    pub select_all: Option<SelectAllControl>,
    pub collapse_enabled: bool,
    pub collapsed: bool,
    pub loading: bool,
    /// Revealed rows. Empty while loading or collapsed.
    pub rows: Vec<OptionRow>,
    /// Step of the next "see more" action, if one is offered.
    pub see_more: Option<usize>,
    pub revealed_count: usize,
    /// Number of options left after search.
    pub matching_count: usize,
    /// Height of the revealed list, in layout units.
    pub list_height: u32,
}

impl FilterGroupView {
    /// Label of the "see more" action.
    pub fn see_more_label(&self) -> Option<String> {
        self.see_more.map(|step| format!("See more ({step})"))
    }

    /// Accessible name of the collapse affordance.
    pub fn collapse_label(&self) -> String {
        format!("collapse-{}", self.label)
    }

    /// Whether the option list is shown.
    pub fn shows_list(&self) -> bool {
        !self.loading && !self.collapsed
    }

    /// Find a visible row by value.
    pub fn row(&self, value: &str) -> Option<&OptionRow> {
        self.rows.iter().find(|row| row.value == value)
    }
}

impl FilterSelector {
    /// Build the view for the given props.
    ///
    /// This is the recompute step: it runs the option pipeline, resets the
    /// pagination window if the list changed identity, and derives checkbox
    /// states from the caller's selection.
    pub fn view(&self, props: &FilterSelectorProps<'_>) -> FilterGroupView {
        let prepared = props.prepare();
        let window = self.sync(&prepared, &props.query());
        let collapsed = self.is_collapsed();
        let controller = SelectionController::new(props.option_list(), props.operator, props.selected);

        let select_all = props.offers_select_all().then(|| SelectAllControl {
            label: props.label.to_string(),
            state: controller.state(),
        });

        let shows_list = !props.is_loading && !collapsed;
        let rows = if shows_list {
            window
                .visible_prefix(&prepared)
                .iter()
                .map(|item| OptionRow {
                    value: item.option.value.clone(),
                    total_count: item.option.total_count,
                    checked: controller.is_selected(&item.option.value),
                    disabled: item.disabled,
                    distribution: distribution(item.option),
                })
                .collect()
        } else {
            Vec::new()
        };

        FilterGroupView {
            id: self.id_string(),
            label: props.label.to_string(),
            select_all,
            collapse_enabled: props.collapse_enabled(),
            collapsed,
            loading: props.is_loading,
            rows,
            see_more: (shows_list && window.has_more()).then(|| window.next_step()),
            revealed_count: window.revealed_count(),
            matching_count: window.total(),
            list_height: window.height(ROW_HEIGHT),
        }
    }
}
