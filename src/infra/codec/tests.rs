//! Unit tests for the frame codec.
use super::*;

#[test]
/// Every length from 0 to 8 survives encode → decode, flags included.
fn test_roundtrip_all_lengths() {
    let ids = [
        CanId::extended(0x1ABC_DEF0),
        CanId::standard(0x123),
        CanId::extended(7).with_remote(),
        CanId(0x2000_0005),
    ];

    for id in ids {
        for len in 0..=CAN_MAX_DLC {
            let payload: [u8; CAN_MAX_DLC] = core::array::from_fn(|i| (i as u8) * 17 + 3);
            let frame = CanFrame::new(id, &payload[..len]).unwrap();

            let wire = encode(&frame).unwrap();
            assert_eq!(wire.dlc as usize, len);
            assert_eq!(wire.id, id.0);

            let decoded = decode(wire.id, &wire.data, wire.dlc).unwrap();
            assert_eq!(decoded, frame);
        }
    }
}

#[test]
/// Every data length code above eight is rejected.
fn test_decode_rejects_long_dlc() {
    let bytes = [0u8; 255];
    for dlc in 9..=255u8 {
        assert_eq!(
            decode(0x10, &bytes, dlc),
            Err(CodecError::InvalidLength { len: dlc as usize })
        );
    }
}

#[test]
/// A mailbox shorter than its data length code is rejected.
fn test_decode_rejects_short_buffer() {
    let bytes = [1u8, 2, 3];
    assert_eq!(
        decode(0x10, &bytes, 4),
        Err(CodecError::InvalidLength { len: 4 })
    );
}

#[test]
/// Bytes past the data length code never reach the frame.
fn test_decode_ignores_trailing_bytes() {
    let wire = WireFrame {
        id: 0x8000_0014,
        data: [1, 2, 3, 4, 0xEE, 0xEE, 0xEE, 0xEE],
        dlc: 4,
    };
    let frame = wire.decode().unwrap();
    assert_eq!(frame.payload(), &[1, 2, 3, 4]);
    assert_eq!(frame.data[4..], [0, 0, 0, 0]);
}

#[test]
/// Encoding a frame whose length field exceeds eight is a caller error.
fn test_encode_rejects_invalid_length() {
    let frame = CanFrame {
        id: CanId::extended(1),
        data: [0; CAN_MAX_DLC],
        len: 9,
    };
    assert_eq!(encode(&frame), Err(CodecError::InvalidLength { len: 9 }));
}
