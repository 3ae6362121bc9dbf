//! The [`Sender`] facade: data and control frames submitted to a [`Transport`].

use crate::config::Config;
use crate::connection::fragmenter::{Fragmentation, Fragments};
use crate::error::{Error, Result};
use crate::message::{CloseCode, Message};
use crate::protocol::OpCode;
use crate::protocol::frame::{FrameEncoder, MAX_CONTROL_FRAME_PAYLOAD};
use crate::protocol::mask::{MaskSource, RandomMask};
use crate::registry::{CloseCodeRegistry, Rfc6455Registry};
use crate::transport::{SendCompletion, Transport};

/// Per-call options for data frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Send as Binary instead of Text.
    pub binary: bool,
    /// Final fragment of the message.
    pub fin: bool,
    /// Mask the frame; `None` uses [`Config::mask_frames`].
    pub mask: Option<bool>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            binary: false,
            fin: true,
            mask: None,
        }
    }
}

impl SendOptions {
    /// Complete text message.
    #[must_use]
    pub fn text() -> Self {
        Self::default()
    }

    /// Complete binary message.
    #[must_use]
    pub fn binary() -> Self {
        Self {
            binary: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn fin(mut self, fin: bool) -> Self {
        self.fin = fin;
        self
    }

    #[must_use]
    pub const fn masked(mut self, mask: bool) -> Self {
        self.mask = Some(mask);
        self
    }

    const fn opcode(&self) -> OpCode {
        if self.binary {
            OpCode::Binary
        } else {
            OpCode::Text
        }
    }
}

/// Counters describing a sender's activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SenderStats {
    /// Frames whose every write the transport accepted.
    pub frames: u64,
    /// Wire bytes of the frames counted in `frames`.
    ///
    /// A frame that fails part-way is not counted, even if its header was
    /// accepted.
    pub bytes_submitted: u64,
    /// Frames encoded into the buffer cache.
    pub cache_hits: u64,
    /// Buffers allocated, counting the cache itself.
    pub allocations: u64,
}

/// Outbound half of a WebSocket endpoint.
///
/// Frames data and control messages and submits them to a [`Transport`].
/// A `Sender` is single-owner: every operation takes `&mut self`, since the
/// buffer cache and fragmentation state change on each call.
///
/// Every operation returns `Err` synchronously for usage errors and
/// submission failures, and otherwise a [`SendCompletion`] that resolves once
/// all writes for the operation have completed.
///
/// ## Example
///
/// ```
/// use rsws_sender::{Config, SendOptions, Sender, WriteTransport};
///
/// let mut sender = Sender::new(WriteTransport::new(Vec::new()), Config::server());
/// let _ = sender.send(b"Hello", SendOptions::text()).unwrap();
/// let _ = sender.close(None, None, None).unwrap();
///
/// let wire = sender.into_transport().into_inner();
/// assert_eq!(&wire[..7], b"\x81\x05Hello");
/// assert_eq!(&wire[7..], &[0x88, 0x02, 0x03, 0xE8]);
/// ```
pub struct Sender<T> {
    transport: T,
    encoder: FrameEncoder,
    fragmentation: Fragmentation,
    masks: Box<dyn MaskSource>,
    registry: Box<dyn CloseCodeRegistry>,
    config: Config,
    frames: u64,
    bytes_submitted: u64,
}

impl<T> Sender<T> {
    /// Create a sender bound to `transport`.
    ///
    /// Allocates the buffer cache up front when `config.buffer_cache_size`
    /// is non-zero. Masks come from the OS RNG and close codes are checked
    /// against RFC 6455.
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            transport,
            encoder: FrameEncoder::with_cache_size(config.buffer_cache_size),
            fragmentation: Fragmentation::Idle,
            masks: Box::new(RandomMask::new()),
            registry: Box::new(Rfc6455Registry),
            config,
            frames: 0,
            bytes_submitted: 0,
        }
    }

    /// Replace the source of masking keys.
    #[must_use]
    pub fn with_mask_source(mut self, masks: impl MaskSource + 'static) -> Self {
        self.masks = Box::new(masks);
        self
    }

    /// Replace the registry consulted by [`close`](Self::close).
    #[must_use]
    pub fn with_registry(mut self, registry: impl CloseCodeRegistry + 'static) -> Self {
        self.registry = Box::new(registry);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current fragmentation state of the data channel.
    pub fn fragmentation(&self) -> Fragmentation {
        self.fragmentation
    }

    pub fn stats(&self) -> SenderStats {
        let cache = self.encoder.cache();
        SenderStats {
            frames: self.frames,
            bytes_submitted: self.bytes_submitted,
            cache_hits: cache.hits(),
            allocations: cache.allocations(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport> Sender<T> {
    /// Send one data frame.
    ///
    /// The first frame of a message is Text or Binary per `options.binary`;
    /// while a message is in progress (a previous send had `fin` unset) the
    /// frame is sent as Continuation. `fin` ends the message.
    ///
    /// # Errors
    ///
    /// - `Error::Submission` if the transport refused the frame
    /// - `Error::PartialFrame` if the header was accepted but the payload was not
    pub fn send(&mut self, data: &[u8], options: SendOptions) -> Result<SendCompletion> {
        let (next, opcode) = self.fragmentation.next(options.opcode(), options.fin);
        self.fragmentation = next;
        let mask = options.mask.unwrap_or(self.config.mask_frames);
        self.frame_and_send(opcode, Some(data), options.fin, mask)
    }

    /// Send a whole message split into frames of at most `fragment_size` bytes.
    ///
    /// `options.fin` is ignored: the last fragment always ends the message.
    /// Resolves after every fragment has completed.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send); fragments submitted before a failure
    /// stay on the wire.
    pub fn send_fragmented(
        &mut self,
        data: &[u8],
        options: SendOptions,
        fragment_size: usize,
    ) -> Result<SendCompletion> {
        let mut completion = SendCompletion::new();
        for (chunk, fin) in Fragments::new(data, fragment_size) {
            completion.join(self.send(chunk, options.fin(fin))?);
        }
        Ok(completion)
    }

    /// Send a Close frame with `code` (default 1000) and an optional reason.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidCloseCode` if the registry rejects `code`
    /// - `Error::ControlFrameTooLarge` if code and reason exceed 125 bytes
    /// - submission errors as for [`send`](Self::send)
    ///
    /// Usage errors are raised before anything is written.
    pub fn close(
        &mut self,
        code: Option<u16>,
        reason: Option<&str>,
        mask: Option<bool>,
    ) -> Result<SendCompletion> {
        if let Some(code) = code {
            if !self.registry.is_valid_close_code(code) {
                return Err(Error::InvalidCloseCode(code));
            }
        }
        let code = code.unwrap_or(CloseCode::Normal.as_u16());
        let reason = reason.unwrap_or_default().as_bytes();

        let len = 2 + reason.len();
        if len > MAX_CONTROL_FRAME_PAYLOAD {
            return Err(Error::ControlFrameTooLarge(len));
        }
        let mut payload = [0u8; MAX_CONTROL_FRAME_PAYLOAD];
        payload[..2].copy_from_slice(&code.to_be_bytes());
        payload[2..len].copy_from_slice(reason);

        let mask = mask.unwrap_or(self.config.mask_frames);
        self.frame_and_send(OpCode::Close, Some(&payload[..len]), true, mask)
    }

    /// Send a Ping. Without `data` the frame is the bare two-byte header.
    ///
    /// # Errors
    ///
    /// `Error::ControlFrameTooLarge` for payloads over 125 bytes, or
    /// submission errors as for [`send`](Self::send).
    pub fn ping(&mut self, data: Option<&[u8]>, mask: Option<bool>) -> Result<SendCompletion> {
        self.control(OpCode::Ping, data, mask)
    }

    /// Send a Pong. Without `data` the frame is the bare two-byte header.
    ///
    /// # Errors
    ///
    /// Same as [`ping`](Self::ping).
    pub fn pong(&mut self, data: Option<&[u8]>, mask: Option<bool>) -> Result<SendCompletion> {
        self.control(OpCode::Pong, data, mask)
    }

    /// Send a [`Message`] as a single frame using the configured masking.
    ///
    /// # Errors
    ///
    /// Same as the operation the message maps to.
    pub fn send_message(&mut self, message: &Message) -> Result<SendCompletion> {
        match message {
            Message::Text(text) => self.send(text.as_bytes(), SendOptions::text()),
            Message::Binary(data) => self.send(data, SendOptions::binary()),
            Message::Ping(data) => self.ping(Some(data), None),
            Message::Pong(data) => self.pong(Some(data), None),
            Message::Close(Some(frame)) => {
                self.close(Some(frame.code.as_u16()), Some(&frame.reason), None)
            }
            Message::Close(None) => self.close(None, None, None),
        }
    }

    fn control(
        &mut self,
        opcode: OpCode,
        data: Option<&[u8]>,
        mask: Option<bool>,
    ) -> Result<SendCompletion> {
        if let Some(data) = data {
            if data.len() > MAX_CONTROL_FRAME_PAYLOAD {
                return Err(Error::ControlFrameTooLarge(data.len()));
            }
        }
        let mask = mask.unwrap_or(self.config.mask_frames);
        self.frame_and_send(opcode, data, true, mask)
    }

    fn frame_and_send(
        &mut self,
        opcode: OpCode,
        payload: Option<&[u8]>,
        fin: bool,
        mask: bool,
    ) -> Result<SendCompletion> {
        let key = match payload {
            Some(_) if mask => Some(self.masks.next_mask()),
            _ => None,
        };
        let frame = self.encoder.encode(opcode, payload, fin, key);

        let mut completion = SendCompletion::new();
        let head = self.transport.write(frame.head()).map_err(|err| {
            log::warn!("{opcode} frame refused by transport: {err}");
            Error::Submission(err.to_string())
        })?;
        completion.push(head);

        if let Some(body) = frame.payload() {
            let written = self.transport.write(body).map_err(|err| {
                log::warn!("{opcode} payload refused after header was submitted: {err}");
                Error::PartialFrame(err.to_string())
            })?;
            completion.push(written);
        }

        self.frames += 1;
        self.bytes_submitted += frame.wire_len() as u64;
        Ok(completion)
    }
}

impl<T> std::fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sender")
            .field("fragmentation", &self.fragmentation)
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
