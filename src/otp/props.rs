//! Configuration for an OTP widget.

use std::rc::Rc;

use crate::types::PropValue;
use super::events::{FocusEvent, OtpChangeEvent};
use super::filter::DEFAULT_MASK_CHAR;
use super::navigation::CellTrack;
use super::template::CellView;

/// `on_change` emitter.
pub type ChangeCallback = Rc<dyn Fn(&OtpChangeEvent)>;

/// `on_focus` / `on_blur` emitter.
pub type FocusCallback = Rc<dyn Fn(&FocusEvent)>;

/// Visual variant of the entry cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Bordered cells on the terminal background.
    #[default]
    Outlined,
    /// Borderless cells on a filled background.
    Filled,
}

/// Keyboard hint for a cell (DOM `inputmode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Numeric,
}

/// Field kind of a cell (DOM `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
}

/// Properties for [`InputOtp`](super::InputOtp).
///
/// Build with struct update syntax:
///
/// ```ignore
/// let otp = InputOtp::new(InputOtpProps {
///     length: 6,
///     integer_only: true,
///     ..Default::default()
/// })?;
/// ```
pub struct InputOtpProps {
    /// Optional widget ID.
    pub id: Option<String>,

    // =========================================================================
    // Behavior
    // =========================================================================

    /// Number of cells (must be at least 1).
    pub length: usize,

    /// Accept digits only, from keys and pastes.
    pub integer_only: bool,

    /// Render tokens as `mask_char`.
    pub mask: bool,

    /// Mask character (default: '•').
    pub mask_char: Option<char>,

    /// Focus cell 0 on creation.
    pub auto_focus: bool,

    // =========================================================================
    // Pass-through display flags
    // =========================================================================

    pub disabled: PropValue<bool>,
    pub readonly: PropValue<bool>,
    pub invalid: PropValue<bool>,
    pub variant: Variant,
    pub tab_index: Option<i32>,

    // =========================================================================
    // Structure and rendering
    // =========================================================================

    /// Cell row with decorations. `None` means plain adjacent cells.
    pub track: Option<CellTrack>,

    /// Custom cell rendering. `None` draws the default boxes.
    pub view: Option<Rc<dyn CellView>>,

    // =========================================================================
    // Emitters
    // =========================================================================

    pub on_change: Option<ChangeCallback>,
    pub on_focus: Option<FocusCallback>,
    pub on_blur: Option<FocusCallback>,
}

impl Default for InputOtpProps {
    fn default() -> Self {
        Self {
            id: None,
            length: 4,
            integer_only: false,
            mask: false,
            mask_char: None,
            auto_focus: false,
            disabled: PropValue::Static(false),
            readonly: PropValue::Static(false),
            invalid: PropValue::Static(false),
            variant: Variant::default(),
            tab_index: None,
            track: None,
            view: None,
            on_change: None,
            on_focus: None,
            on_blur: None,
        }
    }
}

impl InputOtpProps {
    /// Keyboard hint: numeric when integer-only.
    pub fn input_mode(&self) -> InputMode {
        if self.integer_only { InputMode::Numeric } else { InputMode::Text }
    }

    /// Field kind: password when masked.
    pub fn input_type(&self) -> InputType {
        if self.mask { InputType::Password } else { InputType::Text }
    }

    pub fn mask_char(&self) -> char {
        self.mask_char.unwrap_or(DEFAULT_MASK_CHAR)
    }
}
