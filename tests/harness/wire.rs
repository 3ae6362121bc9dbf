use rsws_sender::protocol::apply_mask;

/// One decoded frame, payload unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    pub fin: bool,
    pub rsv: u8,
    pub opcode: u8,
    pub mask: Option<[u8; 4]>,
    pub payload: Vec<u8>,
}

/// Decode the frame at the start of `buf`, returning it and its wire length.
pub fn decode_frame(buf: &[u8]) -> Option<(WireFrame, usize)> {
    if buf.len() < 2 {
        return None;
    }
    let fin = buf[0] & 0x80 != 0;
    let rsv = (buf[0] >> 4) & 0x07;
    let opcode = buf[0] & 0x0F;
    let masked = buf[1] & 0x80 != 0;

    let mut pos = 2;
    let len = match buf[1] & 0x7F {
        126 => {
            let len = u16::from_be_bytes(buf.get(2..4)?.try_into().ok()?) as usize;
            pos += 2;
            len
        }
        127 => {
            let len = u64::from_be_bytes(buf.get(2..10)?.try_into().ok()?) as usize;
            pos += 8;
            len
        }
        len => len as usize,
    };

    let mask = if masked {
        let key: [u8; 4] = buf.get(pos..pos + 4)?.try_into().ok()?;
        pos += 4;
        Some(key)
    } else {
        None
    };

    let mut payload = buf.get(pos..pos + len)?.to_vec();
    if let Some(key) = mask {
        apply_mask(&mut payload, key);
    }

    let frame = WireFrame {
        fin,
        rsv,
        opcode,
        mask,
        payload,
    };
    Some((frame, pos + len))
}

/// Decode every frame in `buf`; panics on trailing garbage.
pub fn decode_all(mut buf: &[u8]) -> Vec<WireFrame> {
    let mut frames = Vec::new();
    while !buf.is_empty() {
        let (frame, used) = decode_frame(buf).expect("truncated frame on the wire");
        frames.push(frame);
        buf = &buf[used..];
    }
    frames
}
