//! WebSocket framing primitives (RFC 6455 Section 5).

pub mod buffer;
pub mod frame;
pub mod mask;
pub mod opcode;

pub use buffer::{BufferCache, DEFAULT_BUFFER_CACHE_SIZE, Region};
pub use frame::{
    EncodedFrame, FrameEncoder, MAX_CONTROL_FRAME_PAYLOAD, MAX_HEADER_SIZE, PayloadLen, header_len,
};
pub use mask::{FixedMask, MaskSource, RandomMask, apply_mask, mask_into};
pub use opcode::OpCode;
