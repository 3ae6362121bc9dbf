//! Reusable output buffer for frame encoding.
//!
//! A [`BufferCache`] owns one buffer allocated up front. Encoding checks out a
//! [`Region`] sized exactly to the frame: a view into the cache when it fits,
//! otherwise a dedicated allocation for that frame only. A region mutably
//! borrows the cache, so it is released before the next frame can be encoded.

use std::ops::{Deref, DerefMut};

use bytes::BytesMut;

/// Default cache size in bytes.
pub const DEFAULT_BUFFER_CACHE_SIZE: usize = 64 * 1024;

/// Single-owner reusable encode buffer.
#[derive(Debug)]
pub struct BufferCache {
    buf: BytesMut,
    allocations: u64,
    hits: u64,
}

/// Output region handed out by [`BufferCache::checkout`].
#[derive(Debug)]
pub enum Region<'a> {
    /// View into the cache; overwritten by the next checkout.
    Cached(&'a mut [u8]),
    /// Buffer allocated for a single oversized frame.
    Dedicated(Vec<u8>),
}

impl BufferCache {
    /// Allocate a cache of `capacity` bytes. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (buf, allocations) = if capacity == 0 {
            (BytesMut::new(), 0)
        } else {
            (BytesMut::zeroed(capacity), 1)
        };
        Self {
            buf,
            allocations,
            hits: 0,
        }
    }

    /// A cache that never holds a buffer; every checkout allocates.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Buffers allocated so far, counting the cache itself.
    #[must_use]
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Checkouts served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Obtain a writable region of exactly `len` bytes.
    ///
    /// Contents are unspecified; the encoder overwrites every byte.
    pub fn checkout(&mut self, len: usize) -> Region<'_> {
        if len <= self.buf.len() {
            self.hits += 1;
            Region::Cached(&mut self.buf[..len])
        } else {
            self.allocations += 1;
            log::debug!(
                "frame of {len} bytes exceeds {} byte cache, allocating dedicated buffer",
                self.buf.len()
            );
            Region::Dedicated(vec![0; len])
        }
    }
}

impl Default for BufferCache {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CACHE_SIZE)
    }
}

impl Region<'_> {
    #[must_use]
    pub fn is_cached(&self) -> bool {
        matches!(self, Region::Cached(_))
    }
}

impl Deref for Region<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Region::Cached(slice) => slice,
            Region::Dedicated(vec) => vec,
        }
    }
}

impl DerefMut for Region<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Region::Cached(slice) => slice,
            Region::Dedicated(vec) => vec,
        }
    }
}
