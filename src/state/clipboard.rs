//! Clipboard Module - Paste source for `Ctrl+V`
//!
//! Terminals deliver system-clipboard pastes as bracketed paste events,
//! which reach the widget through [`InputEvent::Paste`](super::input::InputEvent).
//! This internal buffer backs `Ctrl+V` inside the application: anything the
//! host copies here can be pasted into a focused OTP cell.
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::clipboard;
//!
//! clipboard::copy("482913");
//! assert_eq!(clipboard::paste().as_deref(), Some("482913"));
//! ```

use std::cell::RefCell;

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Copy text to the clipboard.
///
/// Empty strings are ignored (clipboard not modified).
pub fn copy(text: &str) {
    if text.is_empty() {
        return;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
}

/// Most recently copied text, or None if the clipboard is empty.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

/// Clear the clipboard.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

/// Check if clipboard has content.
pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}
