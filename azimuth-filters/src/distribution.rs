//! Proportional outcome distribution per option.

use crate::option::FilterOption;
use crate::outcome::OutcomeKind;

/// Segment order of a distribution bar.
///
/// This is a display order, distinct from [`OutcomeKind::ALL`].
pub const DISPLAY_ORDER: [OutcomeKind; 4] = [
    OutcomeKind::CorrectAndPredicted,
    OutcomeKind::CorrectAndRejected,
    OutcomeKind::IncorrectAndRejected,
    OutcomeKind::IncorrectAndPredicted,
];

/// One segment of a distribution bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub outcome: OutcomeKind,
    /// Share of the option's total, in percent.
    pub percent: f64,
}

impl Segment {
    /// Width as a CSS-style percentage, e.g. `25%`.
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Compute the four distribution segments of an option.
///
/// A zero total yields all-zero segments.
pub fn distribution(option: &FilterOption) -> [Segment; 4] {
    let total = option.total_count;
    DISPLAY_ORDER.map(|outcome| {
        let percent = if total == 0 {
            0.0
        } else {
            option.outcome_counts.get(outcome) as f64 / total as f64 * 100.0
        };
        Segment { outcome, percent }
    })
}

/// Apportion `width` character cells across the segments of an option.
///
/// When the counts add up to the total the widths sum to exactly `width`.
/// They never exceed `width`, even when the counts exceed the total.
pub fn distribution_bar(option: &FilterOption, width: u16) -> [u16; 4] {
    apportion(&distribution(option), width)
}

/// Apportion `width` cells across already computed segments.
///
/// Cells are handed out by largest remainder. Ties go to the earlier segment
/// in [`DISPLAY_ORDER`]. Segments adding up to more than 100% are scaled down
/// to fit, so the widths never sum past `width`.
pub fn apportion(segments: &[Segment; 4], width: u16) -> [u16; 4] {
    let width_f = f64::from(width);

    let percent_sum: f64 = segments.iter().map(|segment| segment.percent.max(0.0)).sum();
    let scale = if percent_sum > 100.0 {
        100.0 / percent_sum
    } else {
        1.0
    };

    let shares = segments.map(|segment| {
        (segment.percent.max(0.0) * scale / 100.0 * width_f).clamp(0.0, width_f)
    });
    let target = u32::from(width).min(shares.iter().sum::<f64>().round() as u32);

    let mut cells = shares.map(|share| share.floor() as u16);
    let mut assigned: u32 = cells.iter().map(|&cell| u32::from(cell)).sum();

    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = shares[a] - shares[a].floor();
        let frac_b = shares[b] - shares[b].floor();
        frac_b.total_cmp(&frac_a)
    });

    for idx in order {
        if assigned >= target {
            break;
        }
        cells[idx] += 1;
        assigned += 1;
    }

    cells
}
