//! InputOtp - the segmented code input.
//!
//! One widget owns the token sequence, the focus state and the form bridge
//! slots. Every cell event, whether it comes from the default terminal cells
//! or from a custom [`CellView`], enters through [`InputOtp::dispatch`]:
//!
//! ```text
//! key / paste ─▶ Input Filter ─▶ TokenSequence ─▶ Navigation ─▶ on_change + bridge
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::{InputOtp, InputOtpProps, KeyboardEvent};
//!
//! let otp = InputOtp::new(InputOtpProps {
//!     length: 6,
//!     integer_only: true,
//!     auto_focus: true,
//!     ..Default::default()
//! })?;
//!
//! otp.handle_key(&KeyboardEvent::new("4"));
//! assert_eq!(otp.value(), "4");
//! assert_eq!(otp.focused(), Some(1));
//! ```

use std::rc::Rc;
use spark_signals::Signal;
use tracing::{debug, trace, warn};

use crate::error::{OtpError, Result};
use crate::layout::OtpLayout;
use crate::state::input::InputEvent;
use crate::state::{clipboard, CellFocus, FocusCallbacks, KeyboardEvent};
use crate::types::PropValue;
use super::events::{CellEvent, EventResult, FocusEvent, InputKind, OtpChangeEvent};
use super::filter::{self, KeyVerdict, PasteVerdict};
use super::forms::{BridgeSlots, ChangeFn, TouchedFn, ValueAccessor};
use super::native::{self, NativeAction};
use super::navigation::{self, CellTrack, Interaction};
use super::props::{ChangeCallback, InputMode, InputOtpProps, InputType, Variant};
use super::template::{CellContext, CellFlags, CellView, TemplateAttrs, TemplateEvents};
use super::tokens::{first_char, TokenSequence};

struct Inner {
    id: Option<String>,
    integer_only: bool,
    mask: bool,
    mask_char: char,
    input_mode: InputMode,
    input_type: InputType,
    variant: Variant,
    tab_index: Option<i32>,
    disabled: PropValue<bool>,
    readonly: PropValue<bool>,
    invalid: PropValue<bool>,
    track: CellTrack,
    view: Option<Rc<dyn CellView>>,
    tokens: TokenSequence,
    focus: CellFocus,
    bridge: BridgeSlots,
    on_change: Option<ChangeCallback>,
}

/// A segmented one-time-password input.
///
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct InputOtp {
    inner: Rc<Inner>,
}

impl InputOtp {
    /// Create a widget from props.
    ///
    /// Fails with [`OtpError::InvalidLength`] for zero cells and with
    /// [`OtpError::TrackMismatch`] when a custom track does not hold
    /// exactly `length` cells.
    pub fn new(props: InputOtpProps) -> Result<Self> {
        if props.length == 0 {
            return Err(OtpError::InvalidLength);
        }

        let track = props.track.clone().unwrap_or_else(|| CellTrack::cells(props.length));
        let cells = track.cell_count();
        if cells != props.length || !track.holds_cells(props.length) {
            return Err(OtpError::TrackMismatch { cells, length: props.length });
        }

        let focus = CellFocus::new();
        let on_focus = props.on_focus.clone();
        let on_blur = props.on_blur.clone();
        focus.register_callbacks(FocusCallbacks {
            on_focus: on_focus.map(|cb| Box::new(move |index| cb(&FocusEvent { index })) as Box<dyn Fn(usize)>),
            on_blur: on_blur.map(|cb| Box::new(move |index| cb(&FocusEvent { index })) as Box<dyn Fn(usize)>),
        });

        let otp = Self {
            inner: Rc::new(Inner {
                input_mode: props.input_mode(),
                input_type: props.input_type(),
                mask_char: props.mask_char(),
                id: props.id,
                integer_only: props.integer_only,
                mask: props.mask,
                variant: props.variant,
                tab_index: props.tab_index,
                disabled: props.disabled,
                readonly: props.readonly,
                invalid: props.invalid,
                track,
                view: props.view,
                tokens: TokenSequence::new(props.length),
                focus,
                bridge: BridgeSlots::default(),
                on_change: props.on_change,
            }),
        };

        debug!(id = ?otp.inner.id, length = props.length, integer_only = props.integer_only, "otp created");

        if props.auto_focus && !otp.is_disabled() {
            otp.dispatch(CellEvent::Focus { index: 0 });
        }

        Ok(otp)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Number of cells.
    pub fn length(&self) -> usize {
        self.inner.tokens.len()
    }

    /// The aggregate value.
    pub fn value(&self) -> String {
        self.inner.tokens.value()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.inner.tokens.tokens()
    }

    pub fn token(&self, index: usize) -> Option<String> {
        self.inner.tokens.token(index)
    }

    /// The token signal, for reactive bindings.
    pub fn tokens_signal(&self) -> Signal<Vec<String>> {
        self.inner.tokens.signal()
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.inner.tokens.is_complete()
    }

    /// The focused cell, if any.
    pub fn focused(&self) -> Option<usize> {
        self.inner.focus.current()
    }

    /// Whether the focused cell's content is selected.
    pub fn is_selected(&self) -> bool {
        self.inner.focus.is_selected()
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    pub fn track(&self) -> &CellTrack {
        &self.inner.track
    }

    pub fn variant(&self) -> Variant {
        self.inner.variant
    }

    pub fn view(&self) -> Option<Rc<dyn CellView>> {
        self.inner.view.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.disabled.get()
    }

    pub fn is_readonly(&self) -> bool {
        self.inner.readonly.get()
    }

    pub fn is_invalid(&self) -> bool {
        self.inner.invalid.get()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.length() {
            Ok(())
        } else {
            Err(OtpError::out_of_range(index, self.length()))
        }
    }

    // =========================================================================
    // Programmatic edits
    // =========================================================================

    /// Replace one token and notify, as if the cell had been edited.
    ///
    /// Only the first character of `text` is kept. Focus does not move.
    pub fn set_token(&self, index: usize, text: &str) -> Result<()> {
        self.inner.tokens.set_token(index, text)?;
        self.commit(CellEvent::Input {
            index,
            value: first_char(text),
            kind: InputKind::Other,
        });
        Ok(())
    }

    /// Populate the cells from an external value without notifying.
    pub fn load_value(&self, value: &str) {
        if self.inner.tokens.load_value(value) {
            debug!(filled = value.chars().count().min(self.length()), "external value loaded");
        }
    }

    /// Focus cell `index` and select its content.
    pub fn focus(&self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.dispatch(CellEvent::Focus { index });
        Ok(())
    }

    /// Move focus out of the widget.
    pub fn blur(&self) {
        if let Some(index) = self.focused() {
            self.dispatch(CellEvent::Blur { index });
        }
    }

    // =========================================================================
    // Dispatch - the single event entry point
    // =========================================================================

    /// Run one cell event through the filter and navigation pipeline.
    ///
    /// Presentation flags are not consulted here; callers gate on
    /// `disabled`/`readonly` before publishing.
    pub fn dispatch(&self, event: CellEvent) -> EventResult {
        let index = event.index();
        if self.check_index(index).is_err() {
            warn!(index, length = self.length(), "cell event outside the sequence");
            return EventResult::IGNORED;
        }

        match &event {
            CellEvent::Input { value, kind, .. } => {
                let kind = *kind;
                if let Err(err) = self.inner.tokens.set_token(index, value) {
                    warn!(%err, "input rejected");
                    return EventResult::IGNORED;
                }
                self.inner.focus.clear_selection();
                self.commit(event);

                match kind {
                    InputKind::InsertText => {
                        self.move_focus(index, Interaction::Insert);
                    }
                    InputKind::DeleteContentForward => {
                        self.move_focus(index, Interaction::DeleteForward);
                    }
                    InputKind::DeleteContentBackward | InputKind::Other => {}
                }
                EventResult::changed(false)
            }

            CellEvent::KeyDown { key, .. } => {
                if !key.is_actionable() {
                    return EventResult::IGNORED;
                }

                let empty = !self.inner.tokens.is_filled(index);
                if let Some(interaction) = Interaction::from_key(key, empty) {
                    let prevented = self.move_focus(index, interaction);
                    return EventResult { prevented, changed: false };
                }

                match filter::filter_key(key, self.inner.integer_only) {
                    KeyVerdict::Allow => EventResult::IGNORED,
                    KeyVerdict::Reject => {
                        trace!(index, key = %key.key, reason = "non-digit", "key suppressed");
                        EventResult::PREVENTED
                    }
                }
            }

            CellEvent::Focus { .. } => {
                self.inner.focus.focus(index);
                EventResult::IGNORED
            }

            CellEvent::Blur { .. } => {
                if self.inner.focus.is_focused(index) {
                    self.inner.focus.blur();
                    self.inner.bridge.notify_touched();
                }
                EventResult::IGNORED
            }

            CellEvent::Paste { text, .. } => {
                match filter::filter_paste(text, self.length(), self.inner.integer_only) {
                    PasteVerdict::Apply(chars) => {
                        let written = self.inner.tokens.overwrite_from_start(&chars);
                        debug!(index, written, "paste applied");
                        self.commit(event);
                        EventResult::changed(true)
                    }
                    PasteVerdict::Empty => {
                        trace!(index, reason = "empty", "paste suppressed");
                        EventResult::PREVENTED
                    }
                    PasteVerdict::NotNumeric => {
                        trace!(index, reason = "not numeric", "paste suppressed");
                        EventResult::PREVENTED
                    }
                }
            }
        }
    }

    /// Apply a navigation decision. Returns whether the key is suppressed.
    fn move_focus(&self, index: usize, interaction: Interaction) -> bool {
        let nav = navigation::navigate(&self.inner.track, index, interaction);
        if let Some(target) = nav.target {
            trace!(from = index, to = target, ?interaction, "focus moved");
            self.inner.focus.focus(target);
        }
        nav.prevent_default
    }

    /// Publish the aggregate after a committed mutation.
    fn commit(&self, original_event: CellEvent) {
        let value = self.value();
        // Codes are never logged, only their fill level
        debug!(filled = value.chars().count(), length = self.length(), "value committed");

        self.inner.bridge.notify_change(&value);
        if let Some(cb) = &self.inner.on_change {
            cb(&OtpChangeEvent { original_event, value });
        }
    }

    // =========================================================================
    // Terminal default path
    // =========================================================================

    /// Handle a key for the focused cell.
    ///
    /// Goes to the custom view when one is set, else behaves like a native
    /// one-character field. Dropped entirely while disabled.
    pub fn handle_key(&self, key: &KeyboardEvent) -> EventResult {
        if self.is_disabled() {
            return EventResult::IGNORED;
        }
        let Some(index) = self.focused() else {
            return EventResult::IGNORED;
        };

        match &self.inner.view {
            Some(view) => match self.cell_context(index) {
                Ok(ctx) => view.on_key(&ctx, key),
                Err(_) => EventResult::IGNORED,
            },
            None => self.native_key(index, key),
        }
    }

    /// Keydown through the pipeline, then the field's default action.
    pub(crate) fn native_key(&self, index: usize, key: &KeyboardEvent) -> EventResult {
        if self.is_disabled() {
            return EventResult::IGNORED;
        }

        let result = self.dispatch(CellEvent::KeyDown { index, key: key.clone() });
        if result.prevented {
            return result;
        }

        let token = self.token(index).unwrap_or_default();
        let selected = self.inner.focus.is_focused(index) && self.is_selected();
        let Some(action) = native::default_action(&token, selected, key) else {
            return result;
        };

        match action {
            NativeAction::SelectAll => {
                self.inner.focus.select_all();
                result
            }
            _ if self.is_readonly() => {
                trace!(index, reason = "readonly", "edit suppressed");
                EventResult::PREVENTED
            }
            NativeAction::Input { value, kind } => self.dispatch(CellEvent::Input { index, value, kind }),
            NativeAction::Paste => match clipboard::paste() {
                Some(text) => self.dispatch(CellEvent::Paste { index, text }),
                None => EventResult::PREVENTED,
            },
        }
    }

    /// Handle pasted text (bracketed paste) for the focused cell.
    pub fn handle_paste(&self, text: &str) -> EventResult {
        if self.is_disabled() || self.is_readonly() {
            trace!(reason = "gated", "paste suppressed");
            return EventResult::PREVENTED;
        }
        match self.focused() {
            Some(index) => self.dispatch(CellEvent::Paste { index, text: text.to_string() }),
            None => EventResult::IGNORED,
        }
    }

    /// Route a terminal event to the widget.
    ///
    /// Clicks hit-test against `layout` (screen coordinates): a click on a
    /// cell focuses it, a click elsewhere blurs the widget.
    pub fn route(&self, event: &InputEvent, layout: &OtpLayout) -> EventResult {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => self.handle_paste(text),
            InputEvent::Click(x, y) => {
                if self.is_disabled() {
                    return EventResult::IGNORED;
                }
                match layout.cell_at(*x, *y) {
                    Some(index) => self.dispatch(CellEvent::Focus { index }),
                    None => {
                        self.blur();
                        EventResult::IGNORED
                    }
                }
            }
            InputEvent::FocusLost => {
                self.blur();
                EventResult::IGNORED
            }
            InputEvent::FocusGained | InputEvent::Resize(..) | InputEvent::None => EventResult::IGNORED,
        }
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Attributes of cell `index`.
    pub fn template_attrs(&self, index: usize) -> Result<TemplateAttrs> {
        self.check_index(index)?;
        let value = self.token(index).unwrap_or_default();

        let mut flags = CellFlags::empty();
        flags.set(CellFlags::FOCUSED, self.inner.focus.is_focused(index));
        flags.set(CellFlags::SELECTED, self.inner.focus.is_focused(index) && self.is_selected());
        flags.set(CellFlags::FILLED, !value.is_empty());
        flags.set(CellFlags::DISABLED, self.is_disabled());
        flags.set(CellFlags::READONLY, self.is_readonly());
        flags.set(CellFlags::INVALID, self.is_invalid());
        flags.set(CellFlags::MASKED, self.inner.mask);

        Ok(TemplateAttrs {
            display: filter::mask_token(&value, self.inner.mask, self.inner.mask_char),
            value,
            input_mode: self.inner.input_mode,
            input_type: self.inner.input_type,
            variant: self.inner.variant,
            tab_index: self.inner.tab_index,
            flags,
        })
    }

    /// Event entry points bound to cell `index`.
    pub fn template_events(&self, index: usize) -> Result<TemplateEvents> {
        self.check_index(index)?;
        Ok(TemplateEvents::new(index, self.clone()))
    }

    /// Full view context of cell `index`.
    pub fn cell_context(&self, index: usize) -> Result<CellContext> {
        Ok(CellContext {
            index,
            attrs: self.template_attrs(index)?,
            events: self.template_events(index)?,
        })
    }
}

// =============================================================================
// Form bridge
// =============================================================================

impl ValueAccessor for InputOtp {
    fn write_value(&self, value: &str) {
        self.load_value(value);
    }

    fn register_on_change(&self, f: ChangeFn) {
        self.inner.bridge.set_on_change(f);
    }

    fn register_on_touched(&self, f: TouchedFn) {
        self.inner.bridge.set_on_touched(f);
    }
}

impl std::fmt::Debug for InputOtp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputOtp")
            .field("id", &self.inner.id)
            .field("tokens", &self.inner.tokens)
            .field("focused", &self.focused())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
