//! FilterSelector private state.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::pagination::{PaginationPolicy, PaginationWindow};
use crate::pipeline::{OptionQuery, PreparedOption};

/// Unique identifier for a FilterSelector widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterSelectorId(usize);

impl FilterSelectorId {
    pub(super) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FilterSelectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__filter_selector_{}", self.0)
    }
}

/// Identity of a prepared option list and the query that produced it.
///
/// Two lists share a key when they hold the same values in the same order and
/// came from the same search text, search mode and operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ListKey(u64);

impl ListKey {
    pub(super) fn of(prepared: &[PreparedOption<'_>], query: &OptionQuery<'_>) -> Self {
        let mut hasher = DefaultHasher::new();
        query.search.hash(&mut hasher);
        query.mode.hash(&mut hasher);
        query.operator.hash(&mut hasher);
        prepared.len().hash(&mut hasher);
        for item in prepared {
            item.option.value.hash(&mut hasher);
        }
        Self(hasher.finish())
    }
}

/// State that survives across renders of the same instance
#[derive(Debug)]
pub(super) struct SelectorInner {
    /// Revealed prefix of the current list
    pub(super) window: PaginationWindow,
    /// Identity of the list `window` was built for
    pub(super) list_key: Option<ListKey>,
    /// Whether the option list is hidden
    pub(super) collapsed: bool,
}

impl SelectorInner {
    pub(super) fn new(policy: PaginationPolicy) -> Self {
        Self {
            window: PaginationWindow::with_policy(0, policy),
            list_key: None,
            collapsed: false,
        }
    }

    /// Bring the window in line with `prepared`.
    ///
    /// Returns true when the list or its query changed and the window was reset.
    pub(super) fn sync(
        &mut self,
        prepared: &[PreparedOption<'_>],
        query: &OptionQuery<'_>,
    ) -> bool {
        let key = ListKey::of(prepared, query);
        if self.list_key == Some(key) {
            return false;
        }
        self.list_key = Some(key);
        self.window.reset(prepared.len());
        true
    }
}
