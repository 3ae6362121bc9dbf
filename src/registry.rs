//! Close status code legality.
//!
//! The sender does not decide which close codes are legal; it asks a
//! [`CloseCodeRegistry`] before framing a Close.

use crate::message::CloseCode;

/// Decides whether a close status code may be sent.
pub trait CloseCodeRegistry: Send + Sync {
    fn is_valid_close_code(&self, code: u16) -> bool;
}

impl<F> CloseCodeRegistry for F
where
    F: Fn(u16) -> bool + Send + Sync,
{
    fn is_valid_close_code(&self, code: u16) -> bool {
        self(code)
    }
}

/// Registry accepting the codes RFC 6455 Section 7.4 allows an endpoint to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rfc6455Registry;

impl CloseCodeRegistry for Rfc6455Registry {
    fn is_valid_close_code(&self, code: u16) -> bool {
        CloseCode::from_u16(code).is_valid()
    }
}
