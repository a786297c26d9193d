//! Keyboard Module - Keyboard event types
//!
//! Key events as the OTP cells see them. Keys are named the way a browser
//! names them ("a", "7", "Backspace", "ArrowLeft"), so a single printable
//! character is always a one-character key name.
//!
//! Conversion from crossterm lives in [`input`](super::input).

// =============================================================================
// KEY NAMES
// =============================================================================

pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";
pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const BACKSPACE: &str = "Backspace";
pub const DELETE: &str = "Delete";
pub const TAB: &str = "Tab";
pub const ENTER: &str = "Enter";
pub const ESCAPE: &str = "Escape";

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// True when a shortcut modifier (ctrl/alt/meta) is held.
    /// Shift alone does not make a chord.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press and repeat both act; release is ignored by the cells.
    pub fn is_actionable(&self) -> bool {
        self.state != KeyState::Release
    }

    /// The character this key produces, if it is a single printable character.
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Check for a specific key without modifiers.
    pub fn is(&self, key: &str) -> bool {
        self.key == key
    }
}

// =============================================================================
// TESTS
// =============================================================================
