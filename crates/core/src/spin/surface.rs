//! Rendering surface the spin scrolls

use std::io;

use crate::models::Participant;

/// Something that can show a vertical list of entries behind a fixed viewport.
///
/// Offsets are in the surface's own units (pixels, terminal rows, ...).
/// Scrolling down the list means a more negative offset.
pub trait SpinSurface {
    /// Replace the displayed entries
    fn load(&mut self, entries: &[Participant]) -> io::Result<()>;

    /// Nominal height of one entry
    fn row_height(&self) -> f64;

    /// Height of the visible window
    fn viewport_height(&self) -> f64;

    /// Current vertical offset of the list
    fn offset(&self) -> f64;

    /// Move the list and redraw
    fn set_offset(&mut self, offset: f64) -> io::Result<()>;

    /// Rendered centre of entry `index`, relative to the viewport top.
    ///
    /// May differ from the nominal layout, e.g. when rows are rounded.
    fn entry_center(&self, index: usize) -> Option<f64>;
}

/// Headless surface that keeps every frame in memory
#[derive(Debug, Clone)]
pub struct MemorySurface {
    entries: Vec<Participant>,
    row_height: f64,
    rendered_row_height: f64,
    viewport_height: f64,
    offset: f64,
    frames: Vec<f64>,
}

impl MemorySurface {
    pub fn new(row_height: f64, viewport_height: f64) -> Self {
        Self {
            entries: Vec::new(),
            row_height,
            rendered_row_height: row_height,
            viewport_height,
            offset: 0.0,
            frames: Vec::new(),
        }
    }

    /// Lay rows out at a slightly different height than the one reported
    pub fn with_rendered_row_height(mut self, rendered: f64) -> Self {
        self.rendered_row_height = rendered;
        self
    }

    pub fn entries(&self) -> &[Participant] {
        &self.entries
    }

    /// Offsets passed to `set_offset`, oldest first
    pub fn frames(&self) -> &[f64] {
        &self.frames
    }

    /// Index of the entry under the viewport centre
    pub fn centered_index(&self) -> Option<usize> {
        let center = self.viewport_height / 2.0 - self.offset;
        if center < 0.0 {
            return None;
        }
        let index = (center / self.rendered_row_height).floor() as usize;
        (index < self.entries.len()).then_some(index)
    }
}

impl SpinSurface for MemorySurface {
    fn load(&mut self, entries: &[Participant]) -> io::Result<()> {
        self.entries = entries.to_vec();
        self.frames.clear();
        Ok(())
    }

    fn row_height(&self) -> f64 {
        self.row_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn set_offset(&mut self, offset: f64) -> io::Result<()> {
        self.offset = offset;
        self.frames.push(offset);
        Ok(())
    }

    fn entry_center(&self, index: usize) -> Option<f64> {
        (index < self.entries.len()).then(|| {
            self.offset + index as f64 * self.rendered_row_height + self.rendered_row_height / 2.0
        })
    }
}
