//! Sender configuration.

use crate::connection::Role;
use crate::protocol::buffer::DEFAULT_BUFFER_CACHE_SIZE;

/// Configuration for a [`Sender`](crate::Sender).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size of the reusable encode buffer, in bytes.
    ///
    /// Frames whose encoded output fits are written into this buffer instead
    /// of a fresh allocation. Zero disables the cache.
    ///
    /// Default: 64 KB (65536)
    pub buffer_cache_size: usize,

    /// Mask frames when a call does not say otherwise.
    ///
    /// RFC 6455 requires clients to mask every frame and servers to mask none.
    ///
    /// Default: false
    pub mask_frames: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_cache_size: DEFAULT_BUFFER_CACHE_SIZE,
            mask_frames: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer cache size; zero disables caching.
    #[must_use]
    pub const fn with_buffer_cache_size(mut self, size: usize) -> Self {
        self.buffer_cache_size = size;
        self
    }

    /// Set the default masking behavior.
    #[must_use]
    pub const fn with_mask_frames(mut self, mask: bool) -> Self {
        self.mask_frames = mask;
        self
    }

    #[must_use]
    pub const fn is_cache_enabled(&self) -> bool {
        self.buffer_cache_size > 0
    }

    /// Defaults for the given role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self {
            mask_frames: role.must_mask(),
            ..Default::default()
        }
    }

    /// Configure for server role (no masking).
    #[must_use]
    pub fn server() -> Self {
        Self::for_role(Role::Server)
    }

    /// Configure for client role (mask all frames).
    #[must_use]
    pub fn client() -> Self {
        Self::for_role(Role::Client)
    }
}
