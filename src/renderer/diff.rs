//! Differential renderer.
//!
//! Compares the current frame to the previous one and only writes cells
//! that changed. Output goes through crossterm commands queued on any
//! writer, wrapped in a synchronized update.
//!
//! # Algorithm
//!
//! 1. Begin synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: write it with [`CellWriter`]
//! 3. End synchronized update and flush
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::{FrameBuffer, CONTINUATION};
use crate::types::{Attr, Cell, Rgba};

/// Map a color to crossterm.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

// =============================================================================
// CellWriter
// =============================================================================

/// Writes cells while tracking terminal state to skip redundant commands.
///
/// Tracks the last cursor position, colors and attributes; a cell only
/// emits the commands for state that changed.
#[derive(Debug, Default)]
pub struct CellWriter {
    last_pos: Option<(u16, u16)>,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl CellWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all tracked state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Write one cell at screen position (`x`, `y`).
    pub fn write_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Right half of a wide char: the terminal already advanced
        if cell.ch == CONTINUATION {
            self.last_pos = Some((x, y));
            return Ok(());
        }

        let sequential = matches!(self.last_pos, Some((lx, ly)) if ly == y && lx + 1 == x);
        if !sequential {
            queue!(out, MoveTo(x, y))?;
        }

        if cell.attrs != self.last_attrs {
            queue!(out, SetAttribute(Attribute::Reset))?;
            for (flag, attribute) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::UNDERLINE, Attribute::Underlined),
                (Attr::INVERSE, Attribute::Reverse),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            // Attribute reset clears colors too
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_color(cell.fg)))?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
            self.last_bg = Some(cell.bg);
        }

        queue!(out, Print(cell.ch))?;
        self.last_pos = Some((x, y));
        Ok(())
    }
}

// =============================================================================
// DiffRenderer
// =============================================================================

/// Differential renderer for a widget drawn at a fixed screen origin.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    origin: (u16, u16),
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// Renderer drawing frames with their top-left corner at `(x, y)`.
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            origin: (x, y),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    /// Render a frame, writing only changed cells.
    ///
    /// Returns true if any cell was written.
    pub fn render<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;
        let (ox, oy) = self.origin;

        queue!(out, BeginSynchronizedUpdate)?;
        self.writer.reset();

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };

                let changed = match &self.previous {
                    Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height() => {
                        prev.get(x, y) != Some(cell)
                    }
                    _ => true,
                };

                if changed {
                    has_changes = true;
                    self.writer.write_cell(out, ox + x, oy + y, cell)?;
                }
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame. Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// Write a whole frame at `origin` without diffing.
pub fn write_frame<W: Write>(out: &mut W, buffer: &FrameBuffer, origin: (u16, u16)) -> io::Result<()> {
    DiffRenderer::new(origin.0, origin.1).render(out, buffer).map(|_| ())
}

// =============================================================================
// Tests
// =============================================================================
