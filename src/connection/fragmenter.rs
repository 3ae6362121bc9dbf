//! Message fragmentation for outgoing WebSocket messages (RFC 6455 Section 5.4).

use crate::protocol::OpCode;

/// Fragmentation state of the data channel on one sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fragmentation {
    /// Ready to begin a new message.
    #[default]
    Idle,
    /// A message has been started and not yet finished.
    InMessage,
}

impl Fragmentation {
    /// Resolve the opcode to emit for a data frame and the state after it.
    ///
    /// The first frame of a message carries `requested`; every later frame
    /// carries `Continuation`. A frame with `fin` set ends the message.
    #[must_use]
    pub const fn next(self, requested: OpCode, fin: bool) -> (Self, OpCode) {
        let emitted = match self {
            Fragmentation::Idle => requested,
            Fragmentation::InMessage => OpCode::Continuation,
        };
        let next = if fin {
            Fragmentation::Idle
        } else {
            Fragmentation::InMessage
        };
        (next, emitted)
    }

    #[inline]
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Fragmentation::Idle)
    }
}

/// Iterator splitting a payload into `(chunk, fin)` fragments without copying.
///
/// An empty payload yields exactly one empty, final fragment.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    payload: &'a [u8],
    fragment_size: usize,
    offset: usize,
    started: bool,
}

impl<'a> Fragments<'a> {
    #[inline]
    #[must_use]
    pub fn new(payload: &'a [u8], fragment_size: usize) -> Self {
        Self {
            payload,
            fragment_size: fragment_size.max(1),
            offset: 0,
            started: false,
        }
    }

    /// Check if more than one fragment will be produced.
    #[inline]
    #[must_use]
    pub fn needs_fragmentation(&self) -> bool {
        self.payload.len() > self.fragment_size
    }

    /// Get remaining bytes to send.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = (&'a [u8], bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.payload.len() {
            if !self.started {
                self.started = true;
                return Some((&self.payload[..0], true));
            }
            return None;
        }

        self.started = true;
        let end = self.payload.len().min(self.offset + self.fragment_size);
        let chunk = &self.payload[self.offset..end];
        self.offset = end;
        Some((chunk, end == self.payload.len()))
    }
}
