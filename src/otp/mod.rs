//! OTP widget - segmented one-time-password entry.
//!
//! - [`tokens`] - cell sequence and the derived aggregate value
//! - [`navigation`] - cell track and focus movement rules
//! - [`filter`] - keystroke, paste and mask constraints
//! - [`native`] - default actions of a one-character field
//! - [`forms`] - form bridge ([`ValueAccessor`])
//! - [`template`] - custom cell views
//! - [`widget`] - [`InputOtp`], the pipeline tying them together

pub mod events;
pub mod filter;
pub mod forms;
pub mod native;
pub mod navigation;
mod props;
pub mod template;
pub mod tokens;
mod widget;

pub use events::{CellEvent, EventResult, FocusEvent, InputKind, OtpChangeEvent};
pub use forms::{ChangeFn, FormControl, TouchedFn, ValueAccessor};
pub use navigation::{CellTrack, Interaction, Navigation, TrackNode};
pub use props::*;
pub use template::{CellContext, CellFlags, CellPalette, CellView, DefaultCellView, TemplateAttrs, TemplateEvents};
pub use tokens::TokenSequence;
pub use widget::InputOtp;
