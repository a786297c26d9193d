//! Renderer - draws the widget into a [`FrameBuffer`] and onto the terminal.
//!
//! ```text
//! InputOtp + OtpLayout ─▶ render() ─▶ FrameBuffer ─▶ DiffRenderer ─▶ terminal
//! ```
//!
//! Layout rects are relative to the widget; the [`DiffRenderer`] origin
//! places the frame on screen.

mod buffer;
mod diff;

pub use buffer::{FrameBuffer, CONTINUATION};
pub use diff::{to_color, write_frame, CellWriter, DiffRenderer};

use crate::layout::OtpLayout;
use crate::otp::{CellView, DefaultCellView, InputOtp, TrackNode};
use crate::types::{Attr, Rgba};

/// Draw every track node of `otp` into a fresh frame sized to `layout`.
pub fn render(otp: &InputOtp, layout: &OtpLayout) -> FrameBuffer {
    let mut frame = FrameBuffer::new(layout.width, layout.height);
    let default_view = DefaultCellView::default();
    let custom = otp.view();
    let view: &dyn CellView = match &custom {
        Some(view) => view.as_ref(),
        None => &default_view,
    };

    let dim = if otp.is_disabled() { Attr::DIM } else { Attr::NONE };
    for (node, rect) in &layout.nodes {
        match node {
            TrackNode::Cell(index) => {
                if let Ok(ctx) = otp.cell_context(*index) {
                    view.draw(&ctx, *rect, &mut frame);
                }
            }
            TrackNode::Decoration(text) => {
                frame.draw_text(rect.x, rect.y, text, Rgba::GRAY, None, dim);
            }
        }
    }

    frame
}

/// Where the terminal cursor belongs: on the text row of the focused cell.
///
/// `None` when no cell is focused.
pub fn cursor_position(otp: &InputOtp, layout: &OtpLayout) -> Option<(u16, u16)> {
    let rect = layout.cell_rect(otp.focused()?)?;
    Some((rect.x + rect.width / 2, rect.y + rect.height / 2))
}
