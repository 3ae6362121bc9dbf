//! Test harness utilities for driving a sender against scripted transports.
//!
//! Provides transports that record every submission and a minimal wire
//! decoder used to check what the sender produced.

#![allow(dead_code)]

mod transport;
mod wire;

pub use transport::{FailingTransport, RecordingTransport};
pub use wire::{WireFrame, decode_all, decode_frame};
