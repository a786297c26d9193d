//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the OTP widget.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `convert_event` - Convert any crossterm Event to an [`InputEvent`]
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `enable_paste` / `disable_paste` - Bracketed paste and focus reporting
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::input::{poll_event, InputEvent};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         otp.route(&event, &layout);
//!     }
//! }
//! ```

use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind, poll, read,
};
use crossterm::execute;
use std::io::stdout;
use std::time::Duration;

use super::keyboard::{self, KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the widget
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Bracketed paste from the terminal (system clipboard)
    Paste(String),
    /// Left mouse button pressed at (column, row)
    Click(u16, u16),
    /// Terminal window gained focus
    FocusGained,
    /// Terminal window lost focus
    FocusLost,
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);

    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => keyboard::ENTER.to_string(),
        KeyCode::Tab => keyboard::TAB.to_string(),
        KeyCode::BackTab => {
            modifiers.shift = true;
            keyboard::TAB.to_string()
        }
        KeyCode::Backspace => keyboard::BACKSPACE.to_string(),
        KeyCode::Delete => keyboard::DELETE.to_string(),
        KeyCode::Esc => keyboard::ESCAPE.to_string(),
        KeyCode::Up => keyboard::ARROW_UP.to_string(),
        KeyCode::Down => keyboard::ARROW_DOWN.to_string(),
        KeyCode::Left => keyboard::ARROW_LEFT.to_string(),
        KeyCode::Right => keyboard::ARROW_RIGHT.to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent { key, modifiers, state }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Paste(text) => InputEvent::Paste(text),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputEvent::Click(mouse.column, mouse.row),
            _ => InputEvent::None,
        },
        CrosstermEvent::FocusGained => InputEvent::FocusGained,
        CrosstermEvent::FocusLost => InputEvent::FocusLost,
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// PASTE / FOCUS REPORTING
// =============================================================================

/// Ask the terminal for bracketed paste and focus change reports.
pub fn enable_paste() -> std::io::Result<()> {
    execute!(stdout(), EnableBracketedPaste, EnableFocusChange)
}

/// Turn bracketed paste and focus reporting back off.
pub fn disable_paste() -> std::io::Result<()> {
    execute!(stdout(), DisableBracketedPaste, DisableFocusChange)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent as CrosstermMouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_key_digit() {
        let event = convert_key_event(key(KeyCode::Char('7'), KeyModifiers::empty()));
        assert_eq!(event.key, "7");
        assert_eq!(event.state, KeyState::Press);
        assert_eq!(event.printable(), Some('7'));
    }

    #[test]
    fn test_convert_editing_keys() {
        let keys = [
            (KeyCode::Backspace, keyboard::BACKSPACE),
            (KeyCode::Delete, keyboard::DELETE),
            (KeyCode::Left, keyboard::ARROW_LEFT),
            (KeyCode::Right, keyboard::ARROW_RIGHT),
            (KeyCode::Up, keyboard::ARROW_UP),
            (KeyCode::Down, keyboard::ARROW_DOWN),
            (KeyCode::Enter, keyboard::ENTER),
            (KeyCode::Esc, keyboard::ESCAPE),
        ];

        for (code, expected) in keys {
            let event = convert_key_event(key(code, KeyModifiers::empty()));
            assert_eq!(event.key, expected);
        }
    }

    #[test]
    fn test_convert_back_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::empty()));
        assert_eq!(event.key, keyboard::TAB);
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_ctrl_v() {
        let event = convert_key_event(key(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(event.key, "v");
        assert!(event.modifiers.ctrl);
        assert!(event.modifiers.is_chord());
    }

    #[test]
    fn test_convert_release() {
        let mut raw = key(KeyCode::Char('1'), KeyModifiers::empty());
        raw.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(raw).state, KeyState::Release);
    }

    #[test]
    fn test_convert_paste_event() {
        let event = convert_event(CrosstermEvent::Paste("123456".to_string()));
        assert_eq!(event, InputEvent::Paste("123456".to_string()));
    }

    #[test]
    fn test_convert_click() {
        let event = convert_event(CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 9,
            row: 2,
            modifiers: KeyModifiers::empty(),
        }));
        assert_eq!(event, InputEvent::Click(9, 2));

        let moved = convert_event(CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::Moved,
            column: 9,
            row: 2,
            modifiers: KeyModifiers::empty(),
        }));
        assert_eq!(moved, InputEvent::None);
    }

    #[test]
    fn test_convert_focus_events() {
        assert_eq!(convert_event(CrosstermEvent::FocusGained), InputEvent::FocusGained);
        assert_eq!(convert_event(CrosstermEvent::FocusLost), InputEvent::FocusLost);
        assert_eq!(convert_event(CrosstermEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
    }
}
