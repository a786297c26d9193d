//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells holding what the widget looks like.
//! Flat `Vec<Cell>` storage, row-major. Wide characters occupy two columns;
//! the second one holds [`CONTINUATION`].

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::{Attr, BorderStyle, Cell, CellRect, Rgba};

/// Marker for the right half of a wide character.
pub const CONTINUATION: char = '\0';

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.index(x, y);
        Some(&mut self.cells[idx])
    }

    /// Iterate one row of cells.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Row `y` as plain text, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell. Returns true if the cell was inside the buffer.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Rgba, bg: Rgba, attrs: Attr) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = Cell { ch, fg, bg, attrs };
                true
            }
            None => false,
        }
    }

    /// Fill a rectangle with a background color, clearing its content.
    pub fn fill_rect(&mut self, rect: CellRect, bg: Rgba) {
        let x2 = rect.x.saturating_add(rect.width).min(self.width);
        let y2 = rect.y.saturating_add(rect.height).min(self.height);

        for row in rect.y..y2 {
            for col in rect.x..x2 {
                self.set_cell(col, row, ' ', Rgba::TERMINAL_DEFAULT, bg, Attr::NONE);
            }
        }
    }

    /// Draw a single character, keeping the existing background when `bg` is `None`.
    pub fn draw_char(&mut self, x: u16, y: u16, ch: char, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> bool {
        let Some(existing) = self.get(x, y).map(|c| c.bg) else {
            return false;
        };
        self.set_cell(x, y, ch, fg, bg.unwrap_or(existing), attrs)
    }

    /// Draw text at a position.
    ///
    /// Returns the number of columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let char_width = ch.width().unwrap_or(0) as u16;
            if char_width == 0 {
                continue;
            }

            if self.draw_char(col, y, ch, fg, bg, attrs) && char_width == 2 {
                self.draw_char(col + 1, y, CONTINUATION, fg, bg, attrs);
            }

            col = col.saturating_add(char_width);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within a width.
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
    ) -> u16 {
        let text_width = text.width();
        if text_width >= width as usize {
            return self.draw_text(x, y, text, fg, bg, attrs);
        }
        let offset = ((width as usize - text_width) / 2) as u16;
        self.draw_text(x + offset, y, text, fg, bg, attrs)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(&mut self, rect: CellRect, style: BorderStyle, color: Rgba, bg: Option<Rgba>, attrs: Attr) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let CellRect { x, y, .. } = rect;
        let x2 = x + rect.width - 1;
        let y2 = y + rect.height - 1;

        self.draw_char(x, y, tl, color, bg, attrs);
        self.draw_char(x2, y, tr, color, bg, attrs);
        self.draw_char(x2, y2, br, color, bg, attrs);
        self.draw_char(x, y2, bl, color, bg, attrs);

        for col in (x + 1)..x2 {
            self.draw_char(col, y, horiz, color, bg, attrs);
            self.draw_char(col, y2, horiz, color, bg, attrs);
        }

        for row in (y + 1)..y2 {
            self.draw_char(x, row, vert, color, bg, attrs);
            self.draw_char(x2, row, vert, color, bg, attrs);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
