//! State Module - Runtime interaction state
//!
//! - **Focus** - Focused cell, select-all flag, focus callbacks
//! - **Keyboard** - Key event types and key names
//! - **Clipboard** - Internal paste buffer for `Ctrl+V`
//! - **Input** - crossterm event conversion and polling

pub mod clipboard;
mod focus;
pub mod input;
mod keyboard;

pub use focus::*;
pub use keyboard::*;
