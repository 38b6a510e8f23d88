//! Character-cell rendering of a FilterSelector view.
//!
//! Produces styled lines with semantic tones. Mapping tones to colors is up to
//! the terminal front end.

use crate::distribution::{DISPLAY_ORDER, apportion};
use crate::outcome::OutcomeKind;
use crate::selection::SelectAllState;

use super::view::{FilterGroupView, OptionRow};

/// Semantic style of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Header,
    Muted,
    Disabled,
    Checked,
    Action,
    Busy,
    Outcome(OutcomeKind),
}

/// A run of text with a single tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// What activating a line acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTarget {
    Header,
    Option(String),
    SeeMore,
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub target: LineTarget,
    pub spans: Vec<Span>,
}

impl RenderedLine {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Layout parameters for [`render_group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Cells reserved for the option value column.
    pub label_width: usize,
    /// Cells of the distribution bar.
    pub bar_width: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            label_width: 24,
            bar_width: 20,
        }
    }
}

const BAR_CELL: &str = "█";
const TRACK_CELL: &str = "·";

/// Render a group view into lines: header, option rows, "see more".
pub fn render_group(view: &FilterGroupView, options: &RenderOptions) -> Vec<RenderedLine> {
    let mut lines = vec![render_header(view)];

    lines.extend(view.rows.iter().map(|row| render_row(row, options)));

    if let Some(label) = view.see_more_label() {
        lines.push(RenderedLine {
            target: LineTarget::SeeMore,
            spans: vec![Span::new(format!("    {label}"), Tone::Action)],
        });
    }

    lines
}

fn render_header(view: &FilterGroupView) -> RenderedLine {
    let indicator = if view.collapsed { "▶" } else { "▼" };
    let indicator_tone = if view.collapse_enabled {
        Tone::Normal
    } else {
        Tone::Disabled
    };

    let mut spans = vec![Span::new(format!("{indicator} "), indicator_tone)];

    if let Some(control) = &view.select_all {
        let (mark, tone) = match control.state {
            SelectAllState::None => ("[ ] ", Tone::Normal),
            SelectAllState::Some => ("[-] ", Tone::Checked),
            SelectAllState::All => ("[x] ", Tone::Checked),
        };
        spans.push(Span::new(mark, tone));
    }

    spans.push(Span::new(view.label.clone(), Tone::Header));

    if view.loading {
        spans.push(Span::new("  loading…", Tone::Busy));
    } else if view.matching_count > 0 {
        spans.push(Span::new(
            format!("  {}/{}", view.revealed_count, view.matching_count),
            Tone::Muted,
        ));
    }

    RenderedLine {
        target: LineTarget::Header,
        spans,
    }
}

fn render_row(row: &OptionRow, options: &RenderOptions) -> RenderedLine {
    let (mark, mark_tone) = match (row.checked, row.disabled) {
        (_, true) => ("[ ] ", Tone::Disabled),
        (true, false) => ("[x] ", Tone::Checked),
        (false, false) => ("[ ] ", Tone::Normal),
    };
    let label_tone = if row.disabled {
        Tone::Disabled
    } else {
        Tone::Normal
    };

    let mut spans = vec![
        Span::new("  ", Tone::Normal),
        Span::new(mark, mark_tone),
        Span::new(fit(&row.value, options.label_width), label_tone),
        Span::new(format!(" {:>6} ", row.total_count), Tone::Muted),
    ];
    spans.extend(render_bar(row, options.bar_width));

    RenderedLine {
        target: LineTarget::Option(row.value.clone()),
        spans,
    }
}

fn render_bar(row: &OptionRow, width: u16) -> Vec<Span> {
    let cells = apportion(&row.distribution, width);
    let mut spans: Vec<Span> = DISPLAY_ORDER
        .iter()
        .zip(cells)
        .filter(|(_, cells)| *cells > 0)
        .map(|(outcome, cells)| Span::new(BAR_CELL.repeat(usize::from(cells)), Tone::Outcome(*outcome)))
        .collect();

    let used: u16 = cells.iter().sum();
    let rest = width.saturating_sub(used);
    if rest > 0 {
        spans.push(Span::new(TRACK_CELL.repeat(usize::from(rest)), Tone::Muted));
    }
    spans
}

/// Pad or truncate to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}
