//! Error types for backlight control.

use thiserror::Error;

/// Backlight error type.
#[derive(Error, Debug)]
pub enum BacklightError {
    /// Device file I/O failed
    #[error("LED device I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Device reported a value this driver cannot interpret
    #[error("unexpected LED device contents: {0}")]
    Malformed(String),
}

/// Result type for backlight operations.
pub type BacklightResult<T> = Result<T, BacklightError>;
