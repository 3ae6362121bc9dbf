//! Payload masking (RFC 6455 Section 5.3).
//!
//! Two kernels are provided: [`apply_mask`] XORs a buffer in place, and
//! [`mask_into`] copies and masks in one pass so the sender never copies a
//! masked payload twice. Keys come from a [`MaskSource`], one per frame.

use std::time::{SystemTime, UNIX_EPOCH};

/// Scalar byte-by-byte XOR masking, in place.
///
/// Masking is an involution: applying the same key twice restores the input.
#[inline]
pub fn apply_mask(data: &mut [u8], mask: [u8; 4]) {
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= mask[i % 4];
    }
}

/// Copy `src` into `dst` while XORing with the repeating `mask`.
///
/// Processes eight bytes per step using a `u64` built from the key repeated
/// twice; the tail is handled bytewise. `dst` must be exactly as long as `src`.
#[inline]
pub fn mask_into(src: &[u8], dst: &mut [u8], mask: [u8; 4]) {
    debug_assert_eq!(src.len(), dst.len());

    let wide = u64::from_ne_bytes([
        mask[0], mask[1], mask[2], mask[3], mask[0], mask[1], mask[2], mask[3],
    ]);

    let mut src_chunks = src.chunks_exact(8);
    let mut dst_chunks = dst.chunks_exact_mut(8);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        let mut word = [0u8; 8];
        word.copy_from_slice(s);
        d.copy_from_slice(&(u64::from_ne_bytes(word) ^ wide).to_ne_bytes());
    }

    // 8 is a multiple of 4, so the tail starts at key offset 0.
    let tail = src_chunks.remainder();
    for (i, (s, d)) in tail
        .iter()
        .zip(dst_chunks.into_remainder().iter_mut())
        .enumerate()
    {
        *d = s ^ mask[i % 4];
    }
}

/// Supplies masking keys, one per masked frame.
pub trait MaskSource: Send {
    /// Produce the key for the next masked frame.
    fn next_mask(&mut self) -> [u8; 4];
}

impl<F> MaskSource for F
where
    F: FnMut() -> [u8; 4] + Send,
{
    fn next_mask(&mut self) -> [u8; 4] {
        self()
    }
}

/// Fresh unpredictable key per frame from the operating system RNG.
///
/// If the OS source fails, keys fall back to a counter mixed through a
/// finalizer, seeded from the clock.
#[derive(Debug)]
pub struct RandomMask {
    fallback: u32,
}

impl RandomMask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback: clock_seed(),
        }
    }

    fn mixed(&mut self) -> [u8; 4] {
        self.fallback = self.fallback.wrapping_add(0x9E37_79B9);
        let a = self.fallback.wrapping_mul(0x85EB_CA6B);
        let b = a ^ (a >> 13);
        b.wrapping_mul(0xC2B2_AE35).to_le_bytes()
    }
}

impl Default for RandomMask {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskSource for RandomMask {
    fn next_mask(&mut self) -> [u8; 4] {
        let mut key = [0u8; 4];
        match getrandom::getrandom(&mut key) {
            Ok(()) => key,
            Err(err) => {
                log::warn!("os rng unavailable, using fallback mask generator: {err}");
                self.mixed()
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(0x1234_5678)
}

/// Always returns the same key. Intended for tests and fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMask(pub [u8; 4]);

impl MaskSource for FixedMask {
    fn next_mask(&mut self) -> [u8; 4] {
        self.0
    }
}
