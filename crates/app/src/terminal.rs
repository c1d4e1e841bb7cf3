//! Terminal spin surface
//!
//! Draws the visible window of the reel as a block of text lines and
//! redraws it in place on every frame. One row is one unit of offset.

use std::io::{self, Write};

use tombola_core::{Participant, SpinSurface};

const CLEAR_LINE: &str = "\r\x1b[2K";
const MARKER: &str = "▶ ";
const BLANK_MARKER: &str = "  ";

pub struct TerminalSurface<W: Write> {
    out: W,
    rows: usize,
    entries: Vec<String>,
    offset: f64,
    /// Whether a block is on screen right above the cursor
    drawn: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, rows: usize) -> Self {
        Self {
            out,
            rows: rows.max(1),
            entries: Vec::new(),
            offset: 0.0,
            drawn: false,
        }
    }

    /// Something else wrote to the terminal; start a fresh block next frame
    pub fn invalidate(&mut self) {
        self.drawn = false;
    }

    /// First visible entry position, rounded to whole rows
    fn top(&self) -> i64 {
        self.offset.round() as i64
    }

    /// Text of each visible row, top to bottom
    pub fn visible_rows(&self) -> Vec<String> {
        let top = self.top();
        let middle = self.rows / 2;

        (0..self.rows)
            .map(|row| {
                let index = row as i64 - top;
                let name = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.entries.get(i))
                    .map(String::as_str)
                    .unwrap_or("");
                let marker = if row == middle { MARKER } else { BLANK_MARKER };
                format!("{marker}{name}")
            })
            .collect()
    }

    fn draw(&mut self) -> io::Result<()> {
        if self.drawn {
            write!(self.out, "\x1b[{}A", self.rows)?;
        }
        for line in self.visible_rows() {
            writeln!(self.out, "{CLEAR_LINE}{line}")?;
        }
        self.drawn = true;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SpinSurface for TerminalSurface<W> {
    fn load(&mut self, entries: &[Participant]) -> io::Result<()> {
        self.entries = entries.iter().map(|p| p.name.clone()).collect();
        self.invalidate();
        Ok(())
    }

    fn row_height(&self) -> f64 {
        1.0
    }

    fn viewport_height(&self) -> f64 {
        self.rows as f64
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn set_offset(&mut self, offset: f64) -> io::Result<()> {
        self.offset = offset;
        self.draw()
    }

    fn entry_center(&self, index: usize) -> Option<f64> {
        (index < self.entries.len()).then(|| self.top() as f64 + index as f64 + 0.5)
    }
}
