//! Input filter - keystroke and paste constraints.

use crate::state::KeyboardEvent;

/// Mask character used when none is configured.
pub const DEFAULT_MASK_CHAR: char = '•';

/// Check that `text` is non-empty and made only of ASCII digits.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// KEYSTROKES
// =============================================================================

/// Whether a keydown may proceed to its native action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVerdict {
    Allow,
    /// Suppressed silently; no state change.
    Reject,
}

/// Filter one keydown.
///
/// With `integer_only`, a key producing a non-digit character is rejected.
/// Named keys (arrows, Backspace, Delete, Tab, ...) and ctrl/alt/meta chords
/// always pass so navigation and shortcuts keep working.
pub fn filter_key(event: &KeyboardEvent, integer_only: bool) -> KeyVerdict {
    if !integer_only || event.modifiers.is_chord() {
        return KeyVerdict::Allow;
    }
    match event.printable() {
        Some(c) if !c.is_ascii_digit() => KeyVerdict::Reject,
        _ => KeyVerdict::Allow,
    }
}

// =============================================================================
// PASTE
// =============================================================================

/// Outcome of filtering pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteVerdict {
    /// Characters to write positionally from cell 0.
    Apply(Vec<char>),
    /// Nothing was pasted.
    Empty,
    /// Integer-only widget and the inspected text is not numeric.
    NotNumeric,
}

/// Number of pasted characters inspected for a widget of `length` cells.
///
/// One character of slack beyond the cell count: the numeric check covers
/// it, the token sequence still stores at most `length` characters.
pub fn paste_window(length: usize) -> usize {
    length + 1
}

/// Filter pasted text for a widget of `length` cells.
pub fn filter_paste(text: &str, length: usize, integer_only: bool) -> PasteVerdict {
    if text.is_empty() {
        return PasteVerdict::Empty;
    }

    let window: String = text.chars().take(paste_window(length)).collect();
    if integer_only && !is_numeric(&window) {
        return PasteVerdict::NotNumeric;
    }

    PasteVerdict::Apply(window.chars().collect())
}

// =============================================================================
// MASKING
// =============================================================================

/// Display form of a token. Masking never touches the stored token.
pub fn mask_token(token: &str, mask: bool, mask_char: char) -> String {
    if mask && !token.is_empty() {
        mask_char.to_string()
    } else {
        token.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
