//! Native field emulation - what a one-character text field does with a key.
//!
//! A terminal has no native text fields, so the default cell path emulates
//! the browser's `maxlength=1` input: the key is first offered to the
//! pipeline as a keydown, and only when nothing suppressed it does the field
//! react. The reaction comes back as an [`NativeAction`], which the widget
//! publishes as an ordinary input or paste event.
//!
//! Caret model: a focused cell either has its whole content selected, or
//! the caret sits after its one character.

use crate::state::{self, KeyboardEvent};
use super::events::InputKind;

/// Default reaction of a one-character field to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeAction {
    /// The field content becomes `value`.
    Input { value: String, kind: InputKind },
    /// Paste from the clipboard.
    Paste,
    /// Select the whole content.
    SelectAll,
}

/// Compute the native action for `key` in a cell holding `token`.
///
/// Returns `None` when the field would do nothing: a full field without a
/// selection refuses further characters, Backspace on an empty field has
/// nothing to remove, and forward delete only removes a selection.
pub fn default_action(token: &str, selected: bool, key: &KeyboardEvent) -> Option<NativeAction> {
    if !key.is_actionable() {
        return None;
    }

    if key.modifiers.ctrl || key.modifiers.meta {
        return match key.key.as_str() {
            "v" | "V" => Some(NativeAction::Paste),
            "a" | "A" => Some(NativeAction::SelectAll),
            _ => None,
        };
    }
    if key.modifiers.alt {
        return None;
    }

    let empty = token.is_empty();
    match key.key.as_str() {
        state::BACKSPACE if !empty => Some(NativeAction::Input {
            value: String::new(),
            kind: InputKind::DeleteContentBackward,
        }),
        state::DELETE if !empty && selected => Some(NativeAction::Input {
            value: String::new(),
            kind: InputKind::DeleteContentForward,
        }),
        _ => {
            let ch = key.printable()?;
            (empty || selected).then(|| NativeAction::Input {
                value: ch.to_string(),
                kind: InputKind::InsertText,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Modifiers;

    fn insert(c: &str) -> Option<NativeAction> {
        Some(NativeAction::Input { value: c.into(), kind: InputKind::InsertText })
    }

    #[test]
    fn test_typing_into_empty_cell() {
        assert_eq!(default_action("", false, &KeyboardEvent::new("7")), insert("7"));
    }

    #[test]
    fn test_typing_overwrites_selection() {
        assert_eq!(default_action("3", true, &KeyboardEvent::new("7")), insert("7"));
    }

    #[test]
    fn test_full_cell_without_selection_refuses() {
        assert_eq!(default_action("3", false, &KeyboardEvent::new("7")), None);
    }

    #[test]
    fn test_backspace() {
        let key = KeyboardEvent::new(state::BACKSPACE);
        let cleared = Some(NativeAction::Input {
            value: String::new(),
            kind: InputKind::DeleteContentBackward,
        });
        assert_eq!(default_action("3", false, &key), cleared);
        assert_eq!(default_action("3", true, &key), cleared);
        assert_eq!(default_action("", true, &key), None);
    }

    #[test]
    fn test_forward_delete_needs_selection() {
        let key = KeyboardEvent::new(state::DELETE);
        assert_eq!(
            default_action("3", true, &key),
            Some(NativeAction::Input {
                value: String::new(),
                kind: InputKind::DeleteContentForward,
            })
        );
        // Caret after the character: nothing ahead to delete
        assert_eq!(default_action("3", false, &key), None);
        assert_eq!(default_action("", true, &key), None);
    }

    #[test]
    fn test_chords() {
        let paste = KeyboardEvent::with_modifiers("v", Modifiers::ctrl());
        assert_eq!(default_action("", false, &paste), Some(NativeAction::Paste));

        let select = KeyboardEvent::with_modifiers("a", Modifiers::ctrl());
        assert_eq!(default_action("1", false, &select), Some(NativeAction::SelectAll));

        let other = KeyboardEvent::with_modifiers("x", Modifiers::ctrl());
        assert_eq!(default_action("", false, &other), None);

        let alt = KeyboardEvent::with_modifiers("x", Modifiers { alt: true, ..Modifiers::none() });
        assert_eq!(default_action("", false, &alt), None);
    }

    #[test]
    fn test_named_keys_do_nothing() {
        for key in [state::TAB, state::ENTER, state::ESCAPE, state::ARROW_LEFT] {
            assert_eq!(default_action("", true, &KeyboardEvent::new(key)), None, "{key}");
        }
    }

    #[test]
    fn test_shift_still_types() {
        let upper = KeyboardEvent::with_modifiers("A", Modifiers::shift());
        assert_eq!(default_action("", false, &upper), insert("A"));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = KeyboardEvent::new("7");
        key.state = state::KeyState::Release;
        assert_eq!(default_action("", false, &key), None);
    }
}
