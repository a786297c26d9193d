//! # spark-otp
//!
//! Segmented one-time-password input for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A row of single-character entry cells behaves, to the surrounding form,
//! as one string value. Tokens live in a signal; the aggregate value is a
//! derived over it. Every cell event goes through one pipeline:
//! ```text
//! crossterm event → InputEvent → InputOtp::dispatch → filter → tokens → navigation → on_change
//! ```
//!
//! The widget only collects characters. Validating the resulting code is
//! the caller's job.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, Cell, PropValue, etc.)
//! - [`state`] - Focus, keyboard, clipboard and terminal input
//! - [`otp`] - The widget: tokens, navigation, filter, form bridge, templates
//! - [`layout`] - Taffy layout of the cell row
//! - [`renderer`] - FrameBuffer drawing and diff output

pub mod error;
pub mod layout;
pub mod otp;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{OtpError, Result};

pub use layout::{compute_layout, LayoutOptions, OtpLayout};

pub use otp::{
    CellContext, CellEvent, CellFlags, CellTrack, CellView, DefaultCellView, EventResult,
    FocusEvent, FormControl, InputKind, InputMode, InputOtp, InputOtpProps, InputType,
    OtpChangeEvent, TemplateAttrs, TemplateEvents, TrackNode, ValueAccessor, Variant,
};

pub use renderer::{cursor_position, render, write_frame, DiffRenderer, FrameBuffer};

pub use state::input::InputEvent;
pub use state::{KeyState, KeyboardEvent, Modifiers};
