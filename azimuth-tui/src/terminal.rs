//! Raw-mode terminal that draws whole screens of styled lines.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthChar;

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub fg: Color,
    pub bold: bool,
}

/// One screen line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenLine {
    pub cells: Vec<Cell>,
    /// Background for the whole line, e.g. the focus highlight.
    pub bg: Option<Color>,
}

impl ScreenLine {
    pub fn plain(text: impl Into<String>, fg: Color) -> Self {
        Self {
            cells: vec![Cell {
                text: text.into(),
                fg,
                bold: false,
            }],
            bg: None,
        }
    }
}

pub struct Terminal {
    stdout: io::Stdout,
    background: Color,
}

impl Terminal {
    /// Enter raw mode and the alternate screen. Restored on drop.
    pub fn new(background: Color) -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout, background })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw a full screen. Lines beyond the terminal height are dropped and
    /// lines wider than the terminal are clipped.
    pub fn draw(&mut self, lines: &[ScreenLine]) -> io::Result<()> {
        let (width, height) = self.size()?;

        queue!(
            self.stdout,
            SetBackgroundColor(self.background),
            terminal::Clear(ClearType::All)
        )?;

        for (y, line) in lines.iter().take(usize::from(height)).enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            let bg = line.bg.unwrap_or(self.background);
            queue!(self.stdout, cursor::MoveTo(0, y), SetBackgroundColor(bg))?;

            let mut remaining = usize::from(width);
            for cell in &line.cells {
                if remaining == 0 {
                    break;
                }
                let (clipped, used) = clip(&cell.text, remaining);
                remaining -= used;
                if cell.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.stdout, SetForegroundColor(cell.fg), Print(clipped))?;
                if cell.bold {
                    queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
                }
            }
            // extend the line background to the edge
            if remaining > 0 {
                queue!(self.stdout, Print(" ".repeat(remaining)))?;
            }
        }

        queue!(self.stdout, ResetColor, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Longest prefix of `text` fitting in `max` columns, and its width.
fn clip(text: &str, max: usize) -> (&str, usize) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            return (&text[..idx], used);
        }
        used += w;
    }
    (text, used)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_respects_wide_chars() {
        assert_eq!(clip("abc", 5), ("abc", 3));
        assert_eq!(clip("abcdef", 4), ("abcd", 4));
        assert_eq!(clip("日本語", 5), ("日本", 4));
        assert_eq!(clip("█··", 2), ("█·", 2));
    }
}
