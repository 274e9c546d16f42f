//! Terminal presentation: buffered, colored frame output.

use std::io::{self, stdout, BufWriter, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};

use crate::renderer::Frame;

/// Fixed foreground color for every glyph, the bright green of the
/// original demo.
const FRAME_COLOR: Color = Color::Green;

/// Writes frames to stdout. Clears the screen and hides the cursor on
/// construction; the cursor is restored when the display is dropped.
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut out = stdout();
        execute!(out, Hide, Clear(ClearType::All))?;
        Ok(Self {
            buffer: BufWriter::new(out),
        })
    }

    /// Draw one frame: home the cursor, then one line per row of
    /// space-joined glyphs wrapped in the fixed color and a reset.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.buffer, MoveTo(0, 0))?;
        for row in frame.rows() {
            queue!(
                self.buffer,
                SetForegroundColor(FRAME_COLOR),
                Print(format_row(row)),
                ResetColor,
                Print("\n")
            )?;
        }
        self.buffer.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), Show);
    }
}

/// Join a row of glyphs with single spaces.
fn format_row(row: &[char]) -> String {
    let mut line = String::with_capacity(row.len() * 2);
    for (i, glyph) in row.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push(*glyph);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_joins_with_spaces() {
        assert_eq!(format_row(&['a', 'b', 'c']), "a b c");
        assert_eq!(format_row(&['@']), "@");
    }

    #[test]
    fn test_format_row_empty() {
        assert_eq!(format_row(&[]), "");
    }
}
