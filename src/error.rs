//! Error type for caller mistakes and terminal I/O.
//!
//! Rejected interactions (a letter typed into an integer-only widget, a
//! non-numeric paste, an arrow key at the boundary) are NOT errors. They are
//! suppressed silently and reported through [`EventResult`](crate::otp::EventResult).

use thiserror::Error;

/// Errors surfaced by the OTP widget API.
#[derive(Debug, Error)]
pub enum OtpError {
    /// The widget was configured with zero cells.
    #[error("otp length must be at least 1")]
    InvalidLength,

    /// A cell index outside `0..length` was supplied.
    #[error("cell index {index} out of range for {length} cells")]
    IndexOutOfRange { index: usize, length: usize },

    /// A custom cell track does not hold exactly `length` cells.
    #[error("cell track holds {cells} cells but length is {length}")]
    TrackMismatch { cells: usize, length: usize },

    /// Taffy failed to compute the cell row layout.
    #[error("layout error: {0}")]
    Layout(String),

    /// Terminal I/O failed while polling events or writing a frame.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OtpError {
    /// Creates an out-of-range error for `index`.
    pub fn out_of_range(index: usize, length: usize) -> Self {
        Self::IndexOutOfRange { index, length }
    }
}

impl From<taffy::TaffyError> for OtpError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Layout(err.to_string())
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, OtpError>;
