//! Outbound connection half: fragmentation tracking and the frame sender.
//!
//! ## Example
//!
//! ```
//! use rsws_sender::{Config, Fragmentation, SendOptions, Sender, WriteTransport};
//!
//! let mut sender = Sender::new(WriteTransport::new(Vec::new()), Config::server());
//! let _ = sender.send(b"Hel", SendOptions::text().fin(false)).unwrap();
//! assert_eq!(sender.fragmentation(), Fragmentation::InMessage);
//! let _ = sender.send(b"lo", SendOptions::text()).unwrap();
//! assert!(sender.fragmentation().is_idle());
//! ```

mod fragmenter;
mod role;
mod sender;

pub use fragmenter::{Fragmentation, Fragments};
pub use role::Role;
pub use sender::{SendOptions, Sender, SenderStats};
