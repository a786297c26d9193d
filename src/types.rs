//! Core types shared by the widget, layout and renderer.

use std::rc::Rc;
use spark_signals::Signal;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with a terminal-default sentinel.
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(220, 50, 47);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const BLUE: Self = Self::rgb(38, 139, 210);
    pub const SURFACE: Self = Self::rgb(48, 52, 64);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::INVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell - one terminal character
// =============================================================================

/// A single terminal cell in a [`FrameBuffer`](crate::renderer::FrameBuffer).
///
/// Not to be confused with an OTP entry cell: an entry cell is drawn as a
/// small box made of several of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// CellRect - placement of one laid-out node
// =============================================================================

/// Position and size of a laid-out node, in terminal columns/rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border styles available for entry cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    /// ─ │ ┌ ┐ └ ┘
    Single,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold,
    /// - | + + + +
    Ascii,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        }
    }
}

// =============================================================================
// PropValue - static, signal or getter
// =============================================================================

/// A property that can be static, a reactive signal, or a getter.
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Clone for PropValue<T> {
    fn clone(&self) -> Self {
        match self {
            PropValue::Static(v) => PropValue::Static(v.clone()),
            PropValue::Signal(s) => PropValue::Signal(s.clone()),
            PropValue::Getter(f) => PropValue::Getter(f.clone()),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for PropValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Static(v) => f.debug_tuple("Static").field(v).finish(),
            PropValue::Signal(s) => f.debug_tuple("Signal").field(&s.get()).finish(),
            PropValue::Getter(g) => f.debug_tuple("Getter").field(&g()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_static() {
        let p: PropValue<bool> = true.into();
        assert!(p.get());
    }

    #[test]
    fn test_prop_value_signal_tracks() {
        let s = signal(false);
        let p = PropValue::Signal(s.clone());
        assert!(!p.get());
        s.set(true);
        assert!(p.get());
    }

    #[test]
    fn test_prop_value_getter() {
        let p: PropValue<u16> = PropValue::Getter(Rc::new(|| 7));
        assert_eq!(p.get(), 7);
    }

    #[test]
    fn test_cell_rect_contains() {
        let r = CellRect::new(2, 1, 3, 3);
        assert!(r.contains(2, 1));
        assert!(r.contains(4, 3));
        assert!(!r.contains(5, 1));
        assert!(!r.contains(1, 1));
    }

    #[test]
    fn test_attr_combination() {
        let a = Attr::BOLD | Attr::INVERSE;
        assert!(a.contains(Attr::INVERSE));
        assert!(!a.contains(Attr::DIM));
    }
}
