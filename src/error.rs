//! Error types for the outbound WebSocket framing layer.
//!
//! Errors fall into three groups: usage errors raised before the transport is
//! touched, submission errors raised when the transport refuses bytes, and
//! completion errors reported later by a [`SendCompletion`](crate::SendCompletion).

use thiserror::Error;

/// Result type alias for sender operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while framing and submitting WebSocket frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Close code rejected by the close-code registry.
    #[error("Invalid close code: {0}")]
    InvalidCloseCode(u16),

    /// Control frame payload too large (>125 bytes).
    #[error("Control frame payload too large: {0} bytes (max: 125)")]
    ControlFrameTooLarge(usize),

    /// The transport refused the frame before any of its bytes were accepted.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// The header was accepted but the payload write failed.
    ///
    /// The wire now carries a truncated frame; the connection must be closed.
    #[error("Partial frame submitted: {0}")]
    PartialFrame(String),

    /// A submitted write later reported failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Returns `true` for errors raised before the transport was touched.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidCloseCode(_) | Error::ControlFrameTooLarge(_)
        )
    }

    /// Returns `true` if the wire may hold a malformed frame after this error.
    #[must_use]
    pub const fn corrupts_stream(&self) -> bool {
        matches!(self, Error::PartialFrame(_) | Error::Io(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
