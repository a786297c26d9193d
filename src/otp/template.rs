//! Cell templates - custom rendering of entry cells.
//!
//! A [`CellView`] draws one cell and may take over its key handling. Every
//! cell gets a [`CellContext`]: its attributes (token, display form, input
//! hints, state flags) and a [`TemplateEvents`] handle whose methods publish
//! into the widget's single dispatch entry point. A custom view therefore
//! changes how a cell looks, never how filtering or navigation behave.
//!
//! # Example
//!
//! ```ignore
//! struct Underscores;
//!
//! impl CellView for Underscores {
//!     fn draw(&self, ctx: &CellContext, rect: CellRect, frame: &mut FrameBuffer) {
//!         let ch = ctx.attrs.display.chars().next().unwrap_or('_');
//!         frame.draw_char(rect.x, rect.y, ch, Rgba::WHITE, None, Attr::NONE);
//!     }
//! }
//! ```

use crate::renderer::FrameBuffer;
use crate::state::KeyboardEvent;
use crate::types::{Attr, BorderStyle, CellRect, Rgba};
use super::events::{CellEvent, EventResult, InputKind};
use super::props::{InputMode, InputType, Variant};
use super::widget::InputOtp;

bitflags::bitflags! {
    /// Per-cell state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const FOCUSED = 1 << 0;
        const SELECTED = 1 << 1;
        const FILLED = 1 << 2;
        const DISABLED = 1 << 3;
        const READONLY = 1 << 4;
        const INVALID = 1 << 5;
        const MASKED = 1 << 6;
    }
}

/// Attributes of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateAttrs {
    /// The stored token (plaintext, even when masked).
    pub value: String,
    /// What the cell shows: the token, or the mask character.
    pub display: String,
    pub input_mode: InputMode,
    pub input_type: InputType,
    pub variant: Variant,
    pub tab_index: Option<i32>,
    pub flags: CellFlags,
}

/// Event entry points bound to one cell.
///
/// Cloning is cheap; the handle shares the widget.
#[derive(Clone)]
pub struct TemplateEvents {
    index: usize,
    otp: InputOtp,
}

impl TemplateEvents {
    pub(crate) fn new(index: usize, otp: InputOtp) -> Self {
        Self { index, otp }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell's content changed to `value`.
    pub fn input(&self, value: &str, kind: InputKind) -> EventResult {
        self.otp.dispatch(CellEvent::Input {
            index: self.index,
            value: value.to_string(),
            kind,
        })
    }

    pub fn keydown(&self, key: &KeyboardEvent) -> EventResult {
        self.otp.dispatch(CellEvent::KeyDown { index: self.index, key: key.clone() })
    }

    pub fn focus(&self) -> EventResult {
        self.otp.dispatch(CellEvent::Focus { index: self.index })
    }

    pub fn blur(&self) -> EventResult {
        self.otp.dispatch(CellEvent::Blur { index: self.index })
    }

    pub fn paste(&self, text: &str) -> EventResult {
        self.otp.dispatch(CellEvent::Paste { index: self.index, text: text.to_string() })
    }

    /// Keydown followed by the one-character field's default action.
    pub fn native_key(&self, key: &KeyboardEvent) -> EventResult {
        self.otp.native_key(self.index, key)
    }
}

/// Everything a view gets for one cell.
#[derive(Clone)]
pub struct CellContext {
    pub index: usize,
    pub attrs: TemplateAttrs,
    pub events: TemplateEvents,
}

/// Renders entry cells.
pub trait CellView {
    /// Draw the cell into `frame` at `rect`.
    fn draw(&self, ctx: &CellContext, rect: CellRect, frame: &mut FrameBuffer);

    /// Handle a key for the focused cell.
    ///
    /// The default behaves like a native field. A view that reimplements
    /// editing must still publish through `ctx.events`.
    fn on_key(&self, ctx: &CellContext, key: &KeyboardEvent) -> EventResult {
        ctx.events.native_key(key)
    }
}

// =============================================================================
// DEFAULT VIEW
// =============================================================================

/// Colors of the default cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPalette {
    pub fg: Rgba,
    /// Background of filled cells.
    pub surface: Rgba,
    pub border: Rgba,
    pub border_focus: Rgba,
    pub invalid: Rgba,
}

impl Default for CellPalette {
    fn default() -> Self {
        Self {
            fg: Rgba::WHITE,
            surface: Rgba::SURFACE,
            border: Rgba::GRAY,
            border_focus: Rgba::BLUE,
            invalid: Rgba::RED,
        }
    }
}

/// Boxes for outlined cells, shaded blocks for filled ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCellView {
    pub palette: CellPalette,
}

impl DefaultCellView {
    fn accent(&self, flags: CellFlags) -> Rgba {
        if flags.contains(CellFlags::INVALID) {
            self.palette.invalid
        } else if flags.contains(CellFlags::FOCUSED) {
            self.palette.border_focus
        } else {
            self.palette.border
        }
    }
}

impl CellView for DefaultCellView {
    fn draw(&self, ctx: &CellContext, rect: CellRect, frame: &mut FrameBuffer) {
        let flags = ctx.attrs.flags;
        let focused = flags.contains(CellFlags::FOCUSED);

        let mut text_attrs = Attr::NONE;
        if flags.contains(CellFlags::DISABLED) {
            text_attrs |= Attr::DIM;
        }
        if flags.contains(CellFlags::SELECTED) {
            text_attrs |= Attr::INVERSE;
        }

        let text_row = rect.y + rect.height / 2;
        match ctx.attrs.variant {
            Variant::Outlined => {
                let style = if focused { BorderStyle::Bold } else { BorderStyle::Rounded };
                let mut border_attrs = Attr::NONE;
                if flags.contains(CellFlags::DISABLED) {
                    border_attrs |= Attr::DIM;
                }
                frame.draw_border(rect, style, self.accent(flags), None, border_attrs);
                frame.draw_text_centered(
                    rect.x,
                    text_row,
                    rect.width,
                    &ctx.attrs.display,
                    self.palette.fg,
                    None,
                    text_attrs,
                );
            }
            Variant::Filled => {
                frame.fill_rect(rect, self.palette.surface);
                if focused {
                    text_attrs |= Attr::UNDERLINE | Attr::BOLD;
                }
                // Keep the cursor cell visible on an empty focused cell
                let display = if ctx.attrs.display.is_empty() && focused { " " } else { &ctx.attrs.display };
                let fg = if flags.contains(CellFlags::INVALID) { self.palette.invalid } else { self.palette.fg };
                frame.draw_text_centered(rect.x, text_row, rect.width, display, fg, None, text_attrs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::otp::InputOtpProps;
    use crate::state;

    fn otp(length: usize) -> InputOtp {
        InputOtp::new(InputOtpProps { length, ..Default::default() }).unwrap()
    }

    fn draw_one(ctx: &CellContext) -> FrameBuffer {
        let mut frame = FrameBuffer::new(3, 3);
        DefaultCellView::default().draw(ctx, CellRect::new(0, 0, 3, 3), &mut frame);
        frame
    }

    #[test]
    fn test_events_publish_into_dispatch() {
        let otp = otp(4);
        let events = otp.template_events(1).unwrap();

        events.focus();
        assert_eq!(otp.focused(), Some(1));

        let result = events.input("7", InputKind::InsertText);
        assert!(result.changed);
        assert_eq!(otp.tokens(), vec!["", "7", "", ""]);
        assert_eq!(otp.focused(), Some(2));
    }

    #[test]
    fn test_events_keydown_runs_navigation() {
        let otp = otp(4);
        otp.focus(2).unwrap();
        let result = otp
            .template_events(2)
            .unwrap()
            .keydown(&KeyboardEvent::new(state::ARROW_LEFT));
        assert!(result.prevented);
        assert_eq!(otp.focused(), Some(1));
    }

    #[test]
    fn test_events_paste() {
        let otp = otp(4);
        let result = otp.template_events(3).unwrap().paste("98");
        assert_eq!(result, EventResult::changed(true));
        assert_eq!(otp.value(), "98");
    }

    #[test]
    fn test_template_lookup_out_of_range() {
        let otp = otp(4);
        assert!(otp.template_events(4).is_err());
        assert!(otp.template_attrs(4).is_err());
    }

    #[test]
    fn test_attrs_flags() {
        let otp = InputOtp::new(InputOtpProps {
            length: 2,
            mask: true,
            integer_only: true,
            ..Default::default()
        })
        .unwrap();
        otp.set_token(0, "4").unwrap();
        otp.focus(0).unwrap();

        let attrs = otp.template_attrs(0).unwrap();
        assert_eq!(attrs.value, "4");
        assert_eq!(attrs.display, "•");
        assert_eq!(attrs.input_mode, InputMode::Numeric);
        assert_eq!(attrs.input_type, InputType::Password);
        assert!(attrs.flags.contains(CellFlags::FOCUSED | CellFlags::SELECTED | CellFlags::FILLED | CellFlags::MASKED));

        let other = otp.template_attrs(1).unwrap();
        assert_eq!(other.display, "");
        assert!(!other.flags.intersects(CellFlags::FOCUSED | CellFlags::FILLED));
    }

    #[test]
    fn test_default_view_outlined() {
        let otp = otp(2);
        otp.set_token(0, "5").unwrap();
        let frame = draw_one(&otp.cell_context(0).unwrap());
        assert_eq!(frame.row_text(0), "╭─╮");
        assert_eq!(frame.row_text(1), "│5│");
        assert_eq!(frame.get(0, 0).unwrap().fg, Rgba::GRAY);
    }

    #[test]
    fn test_default_view_focus_and_invalid() {
        let otp = InputOtp::new(InputOtpProps {
            length: 2,
            invalid: true.into(),
            ..Default::default()
        })
        .unwrap();
        otp.focus(0).unwrap();

        let frame = draw_one(&otp.cell_context(0).unwrap());
        assert_eq!(frame.row_text(0), "┏━┓");
        assert_eq!(frame.get(0, 0).unwrap().fg, Rgba::RED);
    }

    #[test]
    fn test_default_view_filled() {
        let otp = InputOtp::new(InputOtpProps {
            length: 2,
            variant: Variant::Filled,
            ..Default::default()
        })
        .unwrap();
        otp.set_token(1, "8").unwrap();

        let mut frame = FrameBuffer::new(3, 1);
        DefaultCellView::default().draw(&otp.cell_context(1).unwrap(), CellRect::new(0, 0, 3, 1), &mut frame);
        assert_eq!(frame.row_text(0), " 8 ");
        assert_eq!(frame.get(0, 0).unwrap().bg, Rgba::SURFACE);
        assert_eq!(frame.get(1, 0).unwrap().bg, Rgba::SURFACE);
    }

    #[test]
    fn test_custom_view_on_key_routes_through_pipeline() {
        struct Recording(Rc<RefCell<Vec<String>>>);

        impl CellView for Recording {
            fn draw(&self, _ctx: &CellContext, _rect: CellRect, _frame: &mut FrameBuffer) {}

            fn on_key(&self, ctx: &CellContext, key: &KeyboardEvent) -> EventResult {
                self.0.borrow_mut().push(key.key.clone());
                ctx.events.native_key(key)
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let otp = InputOtp::new(InputOtpProps {
            length: 3,
            integer_only: true,
            view: Some(Rc::new(Recording(seen.clone()))),
            ..Default::default()
        })
        .unwrap();
        otp.focus(0).unwrap();

        otp.handle_key(&KeyboardEvent::new("x"));
        otp.handle_key(&KeyboardEvent::new("4"));

        assert_eq!(*seen.borrow(), vec!["x", "4"]);
        assert_eq!(otp.value(), "4");
        assert_eq!(otp.focused(), Some(1));
    }
}
