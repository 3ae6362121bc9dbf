//! Property-based tests for frame encoding.
//!
//! These tests use proptest to drive the sender with arbitrary payloads,
//! keys and fragmentation patterns and decode what reaches the wire.

mod harness;

use harness::{RecordingTransport, decode_all, decode_frame};
use proptest::prelude::*;
use rsws_sender::protocol::{
    FrameEncoder, MAX_HEADER_SIZE, OpCode, apply_mask, header_len, mask_into,
};
use rsws_sender::{Config, FixedMask, SendOptions, Sender};

fn data_opcode_strategy() -> impl Strategy<Value = OpCode> {
    prop_oneof![Just(OpCode::Text), Just(OpCode::Binary)]
}

/// Payload lengths biased toward the 7/16/64-bit boundaries.
fn payload_len_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        0usize..130,
        65530usize..65540,
        Just(125),
        Just(126),
        Just(65535),
        Just(65536),
    ]
}

proptest! {
    // =========================================================================
    // Property 1: masking is an involution
    // =========================================================================
    #[test]
    fn test_mask_twice_is_identity(
        data in prop::collection::vec(any::<u8>(), 0..512),
        key in any::<[u8; 4]>()
    ) {
        let mut masked = vec![0u8; data.len()];
        mask_into(&data, &mut masked, key);
        apply_mask(&mut masked, key);
        prop_assert_eq!(masked, data);
    }

    // =========================================================================
    // Property 2: fused copy-and-mask matches in-place masking
    // =========================================================================
    #[test]
    fn test_mask_into_matches_apply_mask(
        data in prop::collection::vec(any::<u8>(), 0..512),
        key in any::<[u8; 4]>()
    ) {
        let mut expected = data.clone();
        apply_mask(&mut expected, key);
        let mut fused = vec![0u8; data.len()];
        mask_into(&data, &mut fused, key);
        prop_assert_eq!(fused, expected);
    }

    // =========================================================================
    // Property 3: encoded frames decode to the original payload
    // =========================================================================
    #[test]
    fn test_encoded_frame_decodes(
        len in payload_len_strategy(),
        opcode in data_opcode_strategy(),
        fin in any::<bool>(),
        key in prop::option::of(any::<[u8; 4]>())
    ) {
        let payload: Vec<u8> = (0..len).map(|i| (i * 31) as u8).collect();
        let mut encoder = FrameEncoder::default();
        let frame = encoder.encode(opcode, Some(&payload), fin, key);

        let head_len = header_len(len, key.is_some());
        prop_assert!(head_len <= MAX_HEADER_SIZE);
        prop_assert_eq!(frame.wire_len(), head_len + len);

        let wire = frame.to_vec();
        let (decoded, used) = decode_frame(&wire).unwrap();
        prop_assert_eq!(used, wire.len());
        prop_assert_eq!(decoded.fin, fin);
        prop_assert_eq!(decoded.opcode, opcode.as_u8());
        prop_assert_eq!(decoded.mask, key);
        prop_assert_eq!(decoded.payload, payload);
    }

    // =========================================================================
    // Property 4: only the first frame of a message carries its opcode
    // =========================================================================
    #[test]
    fn test_fragment_opcodes(
        fins in prop::collection::vec(any::<bool>(), 1..20),
        binary in any::<bool>()
    ) {
        let mut sender = Sender::new(RecordingTransport::new(), Config::server());
        for fin in &fins {
            let options = if binary { SendOptions::binary() } else { SendOptions::text() };
            let _ = sender.send(b"x", options.fin(*fin)).unwrap();
        }

        let start = if binary { 0x2 } else { 0x1 };
        let frames = decode_all(&sender.transport().wire());
        let mut in_message = false;
        for (frame, fin) in frames.iter().zip(&fins) {
            let expected = if in_message { 0x0 } else { start };
            prop_assert_eq!(frame.opcode, expected);
            prop_assert_eq!(frame.fin, *fin);
            in_message = !fin;
        }
        prop_assert_eq!(sender.fragmentation().is_idle(), !in_message);
    }

    // =========================================================================
    // Property 5: split messages reassemble
    // =========================================================================
    #[test]
    fn test_send_fragmented_reassembles(
        data in prop::collection::vec(any::<u8>(), 0..2000),
        fragment_size in 1usize..300,
        key in any::<[u8; 4]>()
    ) {
        let mut sender = Sender::new(RecordingTransport::new(), Config::client())
            .with_mask_source(FixedMask(key));
        let _ = sender.send_fragmented(&data, SendOptions::binary(), fragment_size).unwrap();

        let frames = decode_all(&sender.transport().wire());
        prop_assert!(frames.iter().all(|f| f.payload.len() <= fragment_size));
        prop_assert_eq!(frames.iter().filter(|f| f.fin).count(), 1);
        prop_assert!(frames.last().is_some_and(|f| f.fin));

        let joined: Vec<u8> = frames.into_iter().flat_map(|f| f.payload).collect();
        prop_assert_eq!(joined, data);
    }

    // =========================================================================
    // Property 6: the buffer cache never changes what reaches the wire
    // =========================================================================
    #[test]
    fn test_cache_does_not_change_output(
        sizes in prop::collection::vec(0usize..3000, 1..12),
        cache_size in 0usize..2048,
        masked in any::<bool>()
    ) {
        let config = Config::server().with_mask_frames(masked);
        let cached_config = config.clone().with_buffer_cache_size(cache_size);
        let mut cached = Sender::new(RecordingTransport::new(), cached_config)
            .with_mask_source(FixedMask([1, 2, 3, 4]));
        let mut uncached = Sender::new(RecordingTransport::new(), config.with_buffer_cache_size(0))
            .with_mask_source(FixedMask([1, 2, 3, 4]));

        for (i, size) in sizes.iter().enumerate() {
            let payload = vec![i as u8; *size];
            let _ = cached.send(&payload, SendOptions::binary()).unwrap();
            let _ = uncached.send(&payload, SendOptions::binary()).unwrap();
        }
        prop_assert_eq!(cached.transport().wire(), uncached.transport().wire());
    }
}
