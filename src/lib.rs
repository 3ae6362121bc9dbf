//! # rsws-sender - Outbound WebSocket frame sender
//!
//! `rsws-sender` frames application data and control messages per RFC 6455
//! and hands the bytes to a pluggable transport.
//!
//! ## Features
//!
//! - **Single allocation on the hot path**: frames are encoded into a reusable
//!   buffer cache; oversized frames get a dedicated buffer
//! - **No payload copy for unmasked frames**: header and payload are two writes
//! - **Fresh masking key per frame** from the OS RNG
//! - **Fragmentation tracking** so continuation frames are emitted automatically
//! - **Completion joins** that resolve once every write of a send has finished
//! - **Tokio writer task** transport behind the `async-tokio` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rsws_sender::{spawn_writer, Config, SendOptions, Sender};
//!
//! let (transport, writer) = spawn_writer(stream);
//! let mut sender = Sender::new(transport, Config::client());
//!
//! sender.send(b"Hello", SendOptions::text())?.await?;
//! sender.close(Some(1000), Some("done"), None)?.await?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod transport;

pub use config::Config;
pub use connection::{Fragmentation, Fragments, Role, SendOptions, Sender, SenderStats};
pub use error::{Error, Result};
pub use message::{CloseCode, CloseFrame, Message};
pub use protocol::{FixedMask, FrameEncoder, MaskSource, OpCode, RandomMask};
pub use registry::{CloseCodeRegistry, Rfc6455Registry};
pub use transport::{SendCompletion, Transport, WriteCompletion, WriteTransport};

#[cfg(feature = "async-tokio")]
pub use transport::{TaskTransport, WriterTask, spawn_writer};
