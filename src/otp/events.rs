//! Cell events - the single entry point both rendering paths publish into.

use crate::state::KeyboardEvent;

/// How a cell's content changed, named after the DOM `inputType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    InsertText,
    DeleteContentBackward,
    DeleteContentForward,
    /// Anything else (autofill, IME commit); updates the token without moving focus.
    Other,
}

/// An event raised by one entry cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEvent {
    /// The cell's content changed to `value`.
    Input { index: usize, value: String, kind: InputKind },
    /// A key went down while the cell had focus.
    KeyDown { index: usize, key: KeyboardEvent },
    /// The cell received focus.
    Focus { index: usize },
    /// The cell lost focus.
    Blur { index: usize },
    /// Text was pasted into the cell.
    Paste { index: usize, text: String },
}

impl CellEvent {
    /// Index of the cell that raised the event.
    pub fn index(&self) -> usize {
        match self {
            CellEvent::Input { index, .. }
            | CellEvent::KeyDown { index, .. }
            | CellEvent::Focus { index }
            | CellEvent::Blur { index }
            | CellEvent::Paste { index, .. } => *index,
        }
    }
}

/// What the pipeline did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResult {
    /// The cell's native behavior must not run (DOM `preventDefault`).
    pub prevented: bool,
    /// A mutation was committed and a change notification went out.
    pub changed: bool,
}

impl EventResult {
    pub const IGNORED: Self = Self { prevented: false, changed: false };
    pub const PREVENTED: Self = Self { prevented: true, changed: false };

    pub(crate) fn changed(prevented: bool) -> Self {
        Self { prevented, changed: true }
    }
}

/// Payload of the `on_change` emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpChangeEvent {
    /// The cell event that caused the change.
    pub original_event: CellEvent,
    /// The new aggregate value.
    pub value: String,
}

/// Payload of the `on_focus` / `on_blur` emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub index: usize,
}
