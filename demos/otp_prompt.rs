//! OTP Prompt Example - six-digit code entry in raw mode
//!
//! Demonstrates:
//! - Integer-only cells with a separator after the third cell
//! - Typing, Backspace, arrows, bracketed paste and Ctrl+V
//! - Mouse clicks focusing cells
//! - Diff rendering at a fixed screen origin
//!
//! Enter submits once every cell is filled, Esc quits.
//! Diagnostics go to stderr: `RUST_LOG=spark_otp=trace cargo run --example otp_prompt 2>otp.log`
//!
//! Run with: cargo run --example otp_prompt

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use tracing_subscriber::EnvFilter;

use spark_otp::state::{self, clipboard, input};
use spark_otp::{
    compute_layout, render, CellTrack, DiffRenderer, InputEvent, InputOtp, InputOtpProps,
    LayoutOptions, OtpChangeEvent,
};

const ORIGIN: (u16, u16) = (2, 2);

/// Restores the terminal on drop, including on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Clear(ClearType::All), Hide, EnableMouseCapture)?;
        input::enable_paste()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = input::disable_paste();
        let _ = execute!(io::stdout(), DisableMouseCapture, Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> spark_otp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Something for Ctrl+V to paste
    clipboard::copy("314159");

    let otp = InputOtp::new(InputOtpProps {
        id: Some("otp".to_string()),
        length: 6,
        integer_only: true,
        auto_focus: true,
        track: Some(CellTrack::cells(6).decorate_after(2, "-")),
        on_change: Some(Rc::new(|e: &OtpChangeEvent| {
            tracing::info!(filled = e.value.len(), "code changed");
        })),
        ..Default::default()
    })?;

    let layout = compute_layout(otp.track(), &LayoutOptions::for_variant(otp.variant()))?;
    let screen_layout = layout.clone().offset(ORIGIN.0, ORIGIN.1);

    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let mut renderer = DiffRenderer::new(ORIGIN.0, ORIGIN.1);

    queue!(out, MoveTo(ORIGIN.0, 0), Print("Enter the 6-digit code (Ctrl+V pastes 314159, Esc quits)"))?;

    let submitted = loop {
        renderer.render(&mut out, &render(&otp, &layout))?;

        let Some(event) = input::poll_event(Duration::from_millis(250))? else {
            continue;
        };

        match &event {
            InputEvent::Key(key) if key.is(state::ESCAPE) => break None,
            InputEvent::Key(key) if key.is(state::ENTER) && otp.is_complete() => break Some(otp.value()),
            InputEvent::Resize(..) => renderer.invalidate(),
            _ => {
                otp.route(&event, &screen_layout);
            }
        }
    };

    let row = ORIGIN.1 + layout.height + 1;
    let message = match submitted {
        Some(code) => format!("Submitted {code}"),
        None => "Cancelled".to_string(),
    };
    execute!(out, MoveTo(ORIGIN.0, row), Print(message), MoveTo(0, row + 1))?;
    out.flush()?;

    Ok(())
}
