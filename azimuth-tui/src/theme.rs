//! Colors for the dashboard.

use azimuth_filters::outcome::OutcomeKind;
use azimuth_filters::selector::Tone;
use crossterm::style::Color;

/// Named colors of the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb { r: 78, g: 204, b: 163 },
            background: Color::Rgb { r: 26, g: 26, b: 46 },
            surface: Color::Rgb { r: 40, g: 40, b: 70 },
            text: Color::Rgb { r: 232, g: 232, b: 232 },
            text_muted: Color::Rgb { r: 127, g: 140, b: 141 },
            error: Color::Rgb { r: 231, g: 76, b: 60 },
            success: Color::Rgb { r: 46, g: 204, b: 113 },
            warning: Color::Rgb { r: 241, g: 196, b: 15 },
            info: Color::Rgb { r: 52, g: 152, b: 219 },
        }
    }

    /// Color of an outcome's distribution segment.
    pub fn outcome(&self, kind: OutcomeKind) -> Color {
        match kind {
            OutcomeKind::CorrectAndPredicted => self.success,
            OutcomeKind::CorrectAndRejected => self.info,
            OutcomeKind::IncorrectAndRejected => self.warning,
            OutcomeKind::IncorrectAndPredicted => self.error,
        }
    }

    /// Foreground color and boldness of a tone.
    pub fn tone(&self, tone: Tone) -> (Color, bool) {
        match tone {
            Tone::Normal => (self.text, false),
            Tone::Header => (self.primary, true),
            Tone::Muted | Tone::Disabled => (self.text_muted, false),
            Tone::Checked => (self.primary, false),
            Tone::Action => (self.info, false),
            Tone::Busy => (self.warning, false),
            Tone::Outcome(kind) => (self.outcome(kind), false),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
