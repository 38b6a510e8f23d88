//! FilterSelector widget - a searchable, paginated multi-select over filter options.
//!
//! The selector is a controlled component. The owning page supplies options,
//! search text and the current selection on every render through
//! [`FilterSelectorProps`], and receives proposed selections through the
//! `on_change` callback. The selector only owns its pagination cursor and its
//! collapsed flag.
//!
//! # Example
//!
//! ```
//! use azimuth_filters::prelude::*;
//!
//! let options = vec![
//!     FilterOption::new("type1").with_total(3),
//!     FilterOption::new("type2").with_total(7),
//! ];
//! let selected = vec!["type2".to_string()];
//!
//! let selector = FilterSelector::new();
//! let props = FilterSelectorProps::new("type")
//!     .options(&options)
//!     .selected(&selected);
//!
//! let view = selector.view(&props);
//! assert_eq!(view.rows[0].value, "type2");
//! assert!(view.select_all.unwrap().state.is_indeterminate());
//! ```

mod events;
mod render;
mod state;
mod view;

pub use events::{EventResult, FilterSelectorEvent};
pub use render::{LineTarget, RenderOptions, RenderedLine, Span, Tone, render_group};
pub use state::FilterSelectorId;
pub use view::{FilterGroupView, OptionRow, SelectAllControl};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::option::FilterOption;
use crate::pagination::{PaginationPolicy, PaginationWindow};
use crate::pipeline::{OptionQuery, Operator, PreparedOption, SearchMode, prepare_options};

use state::SelectorInner;

/// Callback receiving the complete new selection.
pub type ChangeHandler = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// Inputs supplied by the owning page on every render.
#[derive(Debug, Clone, Copy)]
pub struct FilterSelectorProps<'a> {
    pub label: &'a str,
    pub operator: Operator,
    pub max_selectable: usize,
    pub search_text: &'a str,
    pub search_mode: SearchMode,
    pub selected: &'a [String],
    /// `None` while the data source has not delivered anything yet.
    pub options: Option<&'a [FilterOption]>,
    pub is_loading: bool,
}

impl<'a> FilterSelectorProps<'a> {
    /// Props for a group with no options, nothing selected and no search.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            operator: Operator::default(),
            max_selectable: 0,
            search_text: "",
            search_mode: SearchMode::default(),
            selected: &[],
            options: None,
            is_loading: false,
        }
    }

    /// Set the group operator.
    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Set the selection cap hint.
    pub fn max_selectable(mut self, max: usize) -> Self {
        self.max_selectable = max;
        self
    }

    /// Set the search text.
    pub fn search(mut self, text: &'a str) -> Self {
        self.search_text = text;
        self
    }

    /// Set the search mode.
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Set the current selection.
    pub fn selected(mut self, selected: &'a [String]) -> Self {
        self.selected = selected;
        self
    }

    /// Set the option list.
    pub fn options(mut self, options: &'a [FilterOption]) -> Self {
        self.options = Some(options);
        self
    }

    /// Mark the data source as busy.
    pub fn loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    /// Option list, empty while absent.
    pub fn option_list(&self) -> &'a [FilterOption] {
        self.options.unwrap_or(&[])
    }

    /// Pipeline parameters derived from these props.
    pub fn query(&self) -> OptionQuery<'a> {
        OptionQuery::new(self.search_text)
            .mode(self.search_mode)
            .operator(self.operator)
            .max_selectable(self.max_selectable)
    }

    /// Run the option pipeline.
    pub fn prepare(&self) -> Vec<PreparedOption<'a>> {
        prepare_options(self.option_list(), &self.query())
    }

    /// Whether the collapse affordance is enabled.
    ///
    /// Disabled only when nothing is loading and there is nothing to show.
    pub fn collapse_enabled(&self) -> bool {
        self.is_loading || !self.option_list().is_empty()
    }

    /// Whether the group offers a "select all" control.
    pub fn offers_select_all(&self) -> bool {
        self.operator == Operator::Or
    }
}

/// A filter selector widget instance.
///
/// Clones share state, so a clone handed to an event loop drives the same
/// instance the page renders.
pub struct FilterSelector {
    /// Unique identifier for this selector instance
    id: FilterSelectorId,
    /// Internal state
    inner: Arc<RwLock<SelectorInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Selection callback
    on_change: Option<ChangeHandler>,
}

impl FilterSelector {
    /// Create a selector with the default pagination policy.
    pub fn new() -> Self {
        Self::with_policy(PaginationPolicy::default())
    }

    /// Create a selector with a custom pagination policy.
    pub fn with_policy(policy: PaginationPolicy) -> Self {
        Self {
            id: FilterSelectorId::new(),
            inner: Arc::new(RwLock::new(SelectorInner::new(policy))),
            dirty: Arc::new(AtomicBool::new(false)),
            on_change: None,
        }
    }

    /// Register the selection callback.
    pub fn on_change(mut self, handler: impl Fn(Vec<String>) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Get the unique ID for this selector
    pub fn id(&self) -> FilterSelectorId {
        self.id
    }

    /// Get the ID as a string
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Check if the option list is collapsed
    pub fn is_collapsed(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.collapsed)
            .unwrap_or(false)
    }

    /// Number of options currently revealed
    pub fn revealed_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.window.revealed_count())
            .unwrap_or(0)
    }

    /// Snapshot of the pagination window
    pub fn window(&self) -> PaginationWindow {
        self.inner
            .read()
            .map(|guard| guard.window.clone())
            .unwrap_or_else(|_| PaginationWindow::new(0))
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the collapsed state
    pub fn set_collapsed(&self, collapsed: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.collapsed != collapsed
        {
            guard.collapsed = collapsed;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Toggle the collapsed state
    pub fn toggle_collapsed(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.collapsed = !guard.collapsed;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Recompute derived state for a prepared list.
    ///
    /// Resets the pagination window when the list changed identity, or when
    /// the search text, search mode or operator changed, and returns the
    /// window afterwards.
    pub fn sync(
        &self,
        prepared: &[PreparedOption<'_>],
        query: &OptionQuery<'_>,
    ) -> PaginationWindow {
        match self.inner.write() {
            Ok(mut guard) => {
                if guard.sync(prepared, query) {
                    log::debug!(
                        "{}: option list or query changed, window reset to {} of {}",
                        self.id,
                        guard.window.revealed_count(),
                        guard.window.total()
                    );
                    self.dirty.store(true, Ordering::SeqCst);
                }
                guard.window.clone()
            }
            Err(_) => PaginationWindow::new(prepared.len()),
        }
    }

    /// Reveal the next step of the window. Returns how many options were revealed.
    fn reveal_more(&self) -> usize {
        let revealed = self
            .inner
            .write()
            .map(|mut guard| guard.window.reveal_more())
            .unwrap_or(0);
        if revealed > 0 {
            self.dirty.store(true, Ordering::SeqCst);
        }
        revealed
    }

    fn emit(&self, selection: Vec<String>) {
        log::trace!("{}: selection changed to {:?}", self.id, selection);
        if let Some(handler) = &self.on_change {
            handler(selection);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the selector state has changed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for FilterSelector {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            on_change: self.on_change.clone(),
        }
    }
}

impl Default for FilterSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterSelector")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .field("dirty", &self.dirty)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
