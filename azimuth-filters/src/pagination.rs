//! Pagination window over a prepared option list.

use serde::{Deserialize, Serialize};

/// Options revealed before any "see more" action.
pub const INITIAL_VISIBLE: usize = 5;

/// Maximum options exposed by one "see more" action.
pub const REVEAL_STEP: usize = 15;

/// Height of one option row, in layout units.
pub const ROW_HEIGHT: u32 = 28;

/// Reveal policy of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationPolicy {
    pub initial_visible: usize,
    pub reveal_step: usize,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            initial_visible: INITIAL_VISIBLE,
            reveal_step: REVEAL_STEP,
        }
    }
}

/// How many items of a list are currently revealed.
///
/// Invariant: `revealed_count() <= total()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationWindow {
    policy: PaginationPolicy,
    total: usize,
    revealed: usize,
}

impl PaginationWindow {
    /// Fresh window over `total` items with the default policy.
    pub fn new(total: usize) -> Self {
        Self::with_policy(total, PaginationPolicy::default())
    }

    /// Fresh window over `total` items.
    ///
    /// A zero reveal step is raised to one so the list can always be exhausted.
    pub fn with_policy(total: usize, policy: PaginationPolicy) -> Self {
        let policy = PaginationPolicy {
            reveal_step: policy.reveal_step.max(1),
            ..policy
        };
        Self {
            policy,
            total,
            revealed: policy.initial_visible.min(total),
        }
    }

    /// Start over with a new list of `total` items.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.revealed = self.policy.initial_visible.min(total);
    }

    pub fn policy(&self) -> PaginationPolicy {
        self.policy
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// The revealed prefix of `items`.
    pub fn visible_prefix<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.revealed.min(items.len())]
    }

    /// Items not yet revealed.
    pub fn pending_count(&self) -> usize {
        self.total - self.revealed
    }

    /// Whether a "see more" action is available.
    pub fn has_more(&self) -> bool {
        self.pending_count() > 0
    }

    /// Number of items the next "see more" action reveals.
    pub fn next_step(&self) -> usize {
        self.policy.reveal_step.min(self.pending_count())
    }

    /// Reveal the next step. Returns how many items were revealed.
    pub fn reveal_more(&mut self) -> usize {
        let step = self.next_step();
        self.revealed = (self.revealed + step).min(self.total);
        step
    }

    /// Height of the revealed rows.
    pub fn height(&self, row_height: u32) -> u32 {
        u32::try_from(self.revealed)
            .unwrap_or(u32::MAX)
            .saturating_mul(row_height)
    }
}
