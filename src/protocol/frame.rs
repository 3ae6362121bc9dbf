//! WebSocket frame serialization (RFC 6455 Section 5.2).
//!
//! [`FrameEncoder`] writes headers into a [`BufferCache`] region, fuses
//! masking into the payload copy, and leaves unmasked payloads uncopied as a
//! second segment.

use crate::protocol::OpCode;
use crate::protocol::buffer::{BufferCache, Region};
use crate::protocol::mask::mask_into;

/// Maximum payload size for control frames (RFC 6455).
pub const MAX_CONTROL_FRAME_PAYLOAD: usize = 125;

/// Largest possible header: 2 base bytes, 8 length bytes, 4 mask bytes.
pub const MAX_HEADER_SIZE: usize = 14;

/// Payload length class and its on-wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    /// 0..=125, stored directly in the 7-bit field.
    Short(u8),
    /// 126..=65535, marker 126 followed by a 16-bit big-endian length.
    Medium(u16),
    /// Above 65535, marker 127 followed by a 64-bit big-endian length.
    Long(u64),
}

impl PayloadLen {
    /// Classify a payload length.
    #[must_use]
    pub const fn of(len: usize) -> Self {
        if len <= 125 {
            PayloadLen::Short(len as u8)
        } else if len <= 0xFFFF {
            PayloadLen::Medium(len as u16)
        } else {
            PayloadLen::Long(len as u64)
        }
    }

    /// Value of the 7-bit length field.
    #[must_use]
    pub const fn marker(self) -> u8 {
        match self {
            PayloadLen::Short(n) => n,
            PayloadLen::Medium(_) => 126,
            PayloadLen::Long(_) => 127,
        }
    }

    /// Number of extended length bytes following the second header byte.
    #[must_use]
    pub const fn extension_len(self) -> usize {
        match self {
            PayloadLen::Short(_) => 0,
            PayloadLen::Medium(_) => 2,
            PayloadLen::Long(_) => 8,
        }
    }
}

/// Header size for a payload of `payload_len` bytes.
#[must_use]
pub const fn header_len(payload_len: usize, masked: bool) -> usize {
    2 + PayloadLen::of(payload_len).extension_len() + if masked { 4 } else { 0 }
}

/// Write a frame header into the front of `buf`, returning its length.
///
/// `buf` must hold at least [`header_len`] bytes.
fn write_header(
    buf: &mut [u8],
    opcode: OpCode,
    fin: bool,
    len: PayloadLen,
    mask: Option<[u8; 4]>,
) -> usize {
    buf[0] = opcode.header_byte(fin);
    buf[1] = len.marker() | if mask.is_some() { 0x80 } else { 0 };

    let mut offset = 2;
    match len {
        PayloadLen::Short(_) => {}
        PayloadLen::Medium(n) => {
            buf[2..4].copy_from_slice(&n.to_be_bytes());
            offset += 2;
        }
        PayloadLen::Long(n) => {
            buf[2..10].copy_from_slice(&n.to_be_bytes());
            offset += 8;
        }
    }

    if let Some(key) = mask {
        buf[offset..offset + 4].copy_from_slice(&key);
        offset += 4;
    }
    offset
}

/// Frame encoder owning the sender's buffer cache.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    cache: BufferCache,
}

/// Wire bytes for one frame, split into at most two segments.
///
/// The first segment lives in the encoder's cache (or a dedicated buffer) and
/// holds the header, plus the masked payload when masking. The second segment
/// is the caller's unmasked payload, borrowed without copying.
#[derive(Debug)]
pub struct EncodedFrame<'a> {
    head: Region<'a>,
    payload: Option<&'a [u8]>,
}

impl FrameEncoder {
    #[must_use]
    pub fn new(cache: BufferCache) -> Self {
        Self { cache }
    }

    /// Encoder with a cache of `size` bytes; zero disables the cache.
    #[must_use]
    pub fn with_cache_size(size: usize) -> Self {
        Self::new(BufferCache::new(size))
    }

    #[must_use]
    pub fn cache(&self) -> &BufferCache {
        &self.cache
    }

    /// Encode one frame.
    ///
    /// An absent payload produces the bare two-byte header `[fin|opcode, 0]`
    /// and ignores `mask`. A present payload, even an empty one, takes the
    /// full path: masked frames are written whole into one region, unmasked
    /// frames yield a header region plus the untouched payload.
    pub fn encode<'a>(
        &'a mut self,
        opcode: OpCode,
        payload: Option<&'a [u8]>,
        fin: bool,
        mask: Option<[u8; 4]>,
    ) -> EncodedFrame<'a> {
        let Some(payload) = payload else {
            let mut head = self.cache.checkout(2);
            head[0] = opcode.header_byte(fin);
            head[1] = 0;
            log::trace!("encoded {opcode} frame without payload (fin={fin})");
            return EncodedFrame {
                head,
                payload: None,
            };
        };

        let len = PayloadLen::of(payload.len());
        let header_size = header_len(payload.len(), mask.is_some());

        log::trace!(
            "encoding {opcode} frame: fin={fin} len={} masked={}",
            payload.len(),
            mask.is_some()
        );

        match mask {
            Some(key) => {
                let mut head = self.cache.checkout(header_size + payload.len());
                let offset = write_header(&mut head, opcode, fin, len, Some(key));
                mask_into(payload, &mut head[offset..], key);
                EncodedFrame {
                    head,
                    payload: None,
                }
            }
            None => {
                let mut head = self.cache.checkout(header_size);
                write_header(&mut head, opcode, fin, len, None);
                EncodedFrame {
                    head,
                    payload: Some(payload),
                }
            }
        }
    }
}

impl<'a> EncodedFrame<'a> {
    /// Header segment (with masked payload, when masked).
    #[must_use]
    pub fn head(&self) -> &[u8] {
        &self.head
    }

    /// Unmasked payload to be written after the head.
    #[must_use]
    pub fn payload(&self) -> Option<&'a [u8]> {
        self.payload
    }

    /// Whether the head was served from the buffer cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.head.is_cached()
    }

    /// Segments in wire order.
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(self.head()).chain(self.payload)
    }

    /// Total bytes on the wire.
    #[must_use]
    pub fn wire_len(&self) -> usize {
        self.head.len() + self.payload.map_or(0, <[u8]>::len)
    }

    /// Concatenate the segments into one owned buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        for segment in self.segments() {
            out.extend_from_slice(segment);
        }
        out
    }
}
