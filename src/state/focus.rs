//! Focus System - Which entry cell has focus
//!
//! Each OTP widget owns one [`CellFocus`]:
//! - `current` signal (focused cell index, `None` when the widget is blurred)
//! - `selected` signal (whether the focused cell's content is selected)
//! - focus callbacks (on_focus/on_blur) fired at the source
//!
//! Focusing a cell always selects its whole content, so the next keystroke
//! overwrites a filled cell instead of being blocked by the one-character limit.
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::{CellFocus, FocusCallbacks};
//!
//! let focus = CellFocus::new();
//! let cleanup = focus.register_callbacks(FocusCallbacks {
//!     on_focus: Some(Box::new(|i| println!("cell {i} focused"))),
//!     on_blur: None,
//! });
//!
//! focus.focus(0);
//! assert_eq!(focus.current(), Some(0));
//! cleanup();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use spark_signals::{signal, Signal};

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes. Both receive the cell index.
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn(usize)>>,
    pub on_blur: Option<Box<dyn Fn(usize)>>,
}

// =============================================================================
// CELL FOCUS
// =============================================================================

/// Focus state for one sequence of entry cells.
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct CellFocus {
    current: Signal<Option<usize>>,
    selected: Signal<bool>,
    callbacks: Rc<RefCell<Vec<(usize, FocusCallbacks)>>>,
    next_id: Rc<Cell<usize>>,
}

impl Default for CellFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl CellFocus {
    pub fn new() -> Self {
        Self {
            current: signal(None),
            selected: signal(false),
            callbacks: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// The focused cell, if any.
    pub fn current(&self) -> Option<usize> {
        self.current.get()
    }

    /// Check if any cell is focused
    pub fn has_focus(&self) -> bool {
        self.current().is_some()
    }

    /// Check if a specific cell is focused
    pub fn is_focused(&self, index: usize) -> bool {
        self.current() == Some(index)
    }

    /// Whether the focused cell's content is selected.
    pub fn is_selected(&self) -> bool {
        self.has_focus() && self.selected.get()
    }

    /// Collapse the selection (caret after the cell's character).
    pub fn clear_selection(&self) {
        self.selected.set(false);
    }

    /// Select the focused cell's whole content.
    pub fn select_all(&self) {
        if self.has_focus() {
            self.selected.set(true);
        }
    }

    /// Register focus callbacks. Returns cleanup function to unregister.
    pub fn register_callbacks(&self, callbacks: FocusCallbacks) -> impl FnOnce() + use<> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push((id, callbacks));

        let registry = self.callbacks.clone();
        move || {
            registry.borrow_mut().retain(|(cb_id, _)| *cb_id != id);
        }
    }

    /// Focus a cell and select its content.
    ///
    /// Returns true if focus moved. Re-focusing the focused cell only
    /// re-selects its content and fires no callbacks.
    pub fn focus(&self, index: usize) -> bool {
        let moved = self.set_focus_with_callbacks(Some(index));
        self.selected.set(true);
        moved
    }

    /// Clear focus (no cell focused).
    pub fn blur(&self) -> bool {
        let moved = self.set_focus_with_callbacks(None);
        self.selected.set(false);
        moved
    }

    /// Set focus and fire callbacks at the source
    fn set_focus_with_callbacks(&self, new_index: Option<usize>) -> bool {
        let old_index = self.current();

        // No change, no callbacks
        if old_index == new_index {
            return false;
        }

        if let Some(old) = old_index {
            for (_, cb) in self.callbacks.borrow().iter() {
                if let Some(ref on_blur) = cb.on_blur {
                    on_blur(old);
                }
            }
        }

        self.current.set(new_index);

        if let Some(new) = new_index {
            for (_, cb) in self.callbacks.borrow().iter() {
                if let Some(ref on_focus) = cb.on_focus {
                    on_focus(new);
                }
            }
        }

        true
    }
}

// =============================================================================
// TESTS
// =============================================================================
