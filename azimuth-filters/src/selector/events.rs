//! Event handling for the FilterSelector widget.

use crate::selection::SelectionController;

use super::{FilterSelector, FilterSelectorProps};

/// A discrete user interaction with a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelectorEvent {
    /// Activate the group-level "select all" control.
    ToggleAll,
    /// Activate one option's checkbox.
    ToggleOption(String),
    /// Activate the "see more" action.
    RevealMore,
    /// Activate the collapse affordance.
    ToggleCollapsed,
}

/// Whether a selector acted on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

impl FilterSelector {
    /// Handle an event against the current props.
    ///
    /// Selection changes are reported through `on_change` as a complete
    /// replacement set. Events for controls the view does not offer are
    /// ignored.
    pub fn dispatch(&self, event: &FilterSelectorEvent, props: &FilterSelectorProps<'_>) -> EventResult {
        match event {
            FilterSelectorEvent::ToggleAll => {
                if !props.offers_select_all() || props.option_list().is_empty() {
                    return EventResult::Ignored;
                }
                let controller =
                    SelectionController::new(props.option_list(), props.operator, props.selected);
                self.emit(controller.toggle_all());
                EventResult::Consumed
            }
            FilterSelectorEvent::ToggleOption(value) => {
                if props.is_loading {
                    return EventResult::Ignored;
                }
                let controller =
                    SelectionController::new(props.option_list(), props.operator, props.selected);
                match controller.toggle(value) {
                    Some(selection) => {
                        self.emit(selection);
                        EventResult::Consumed
                    }
                    None => EventResult::Ignored,
                }
            }
            FilterSelectorEvent::RevealMore => {
                if props.is_loading || self.is_collapsed() {
                    return EventResult::Ignored;
                }
                self.sync(&props.prepare(), &props.query());
                if self.reveal_more() > 0 {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            FilterSelectorEvent::ToggleCollapsed => {
                if !props.collapse_enabled() {
                    return EventResult::Ignored;
                }
                self.toggle_collapsed();
                EventResult::Consumed
            }
        }
    }
}
