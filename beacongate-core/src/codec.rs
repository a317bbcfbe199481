//! Beacon payload codec
//!
//! Decodes the vendor-tagged advertisement format:
//!
//! ```text
//! [0xFF][0xFF][0x55][N payload bytes]
//!  │      │     │    └─ little-endian value, width fixed per variant
//!  │      └─────┴─ company ID + internal packet identifier
//!  └─ manufacturer-specific AD marker
//! ```
//!
//! Two variants exist in the field: a 7-byte frame carrying an unsigned
//! 32-bit value and an 11-byte frame carrying a 64-bit float. Both share
//! one codec; the variant is selected at composition time by the
//! [`BeaconValue`] type parameter, which also fixes the expected frame
//! length. Decoding is a pure function: a frame with the wrong length or
//! header yields nothing, with no side effects — the caller decides
//! whether to log the drop.

use core::fmt;
use core::marker::PhantomData;

/// Vendor header every valid frame starts with
pub const FRAME_HEADER: [u8; 3] = [0xFF, 0xFF, 0x55];

/// Numeric kind carried in a beacon frame
///
/// Implementations reinterpret the payload bytes bit-for-bit; no scaling
/// or range checking happens at this layer.
pub trait BeaconValue: Copy + PartialOrd + fmt::Display + fmt::Debug {
    /// Payload width in bytes (frame length minus the 3-byte header)
    const WIDTH: usize;

    /// Reinterpret little-endian payload bytes as a value
    ///
    /// Returns `None` when `bytes` is not exactly [`Self::WIDTH`] long.
    fn decode_le(bytes: &[u8]) -> Option<Self>;

    /// Write the value back out as little-endian payload bytes
    ///
    /// Returns `None` when `out` is not exactly [`Self::WIDTH`] long.
    fn encode_le(self, out: &mut [u8]) -> Option<()>;

    /// Widen to `f64` for the control surface readouts
    fn as_f64(self) -> f64;
}

impl BeaconValue for u32 {
    const WIDTH: usize = 4;

    fn decode_le(bytes: &[u8]) -> Option<Self> {
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    fn encode_le(self, out: &mut [u8]) -> Option<()> {
        if out.len() != Self::WIDTH {
            return None;
        }
        out.copy_from_slice(&self.to_le_bytes());
        Some(())
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl BeaconValue for f64 {
    const WIDTH: usize = 8;

    fn decode_le(bytes: &[u8]) -> Option<Self> {
        // from_le_bytes goes through the bit pattern, so NaN payloads
        // survive the trip unchanged.
        Some(f64::from_le_bytes(bytes.try_into().ok()?))
    }

    fn encode_le(self, out: &mut [u8]) -> Option<()> {
        if out.len() != Self::WIDTH {
            return None;
        }
        out.copy_from_slice(&self.to_le_bytes());
        Some(())
    }

    fn as_f64(self) -> f64 {
        self
    }
}

/// Frame codec for one beacon variant
///
/// `BeaconCodec<u32>` handles the 7-byte "airq" frames,
/// `BeaconCodec<f64>` the 11-byte "custom" frames. Stateless; both
/// operations are associated functions.
pub struct BeaconCodec<V: BeaconValue> {
    _value: PhantomData<V>,
}

impl<V: BeaconValue> BeaconCodec<V> {
    /// Exact frame length this variant accepts
    pub const FRAME_LEN: usize = FRAME_HEADER.len() + V::WIDTH;

    /// Decode one raw advertisement payload
    ///
    /// Rejects frames whose length differs from [`Self::FRAME_LEN`] or
    /// whose first three bytes are not [`FRAME_HEADER`].
    pub fn decode(payload: &[u8]) -> Option<V> {
        if payload.len() != Self::FRAME_LEN {
            return None;
        }
        if payload[..FRAME_HEADER.len()] != FRAME_HEADER {
            return None;
        }
        V::decode_le(&payload[FRAME_HEADER.len()..])
    }

    /// Encode a value into a frame, the exact inverse of [`Self::decode`]
    ///
    /// Writes [`Self::FRAME_LEN`] bytes into the front of `out` and
    /// returns the length written, or `None` when `out` is too short.
    /// Used by tests and simulated beacons.
    pub fn encode(value: V, out: &mut [u8]) -> Option<usize> {
        let body = FRAME_HEADER.len();
        if out.len() < Self::FRAME_LEN {
            return None;
        }
        out[..body].copy_from_slice(&FRAME_HEADER);
        value.encode_le(&mut out[body..Self::FRAME_LEN])?;
        Some(Self::FRAME_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_reference_frame() {
        // 100 as little-endian u32 behind the vendor header
        let payload = [0xFF, 0xFF, 0x55, 0x64, 0x00, 0x00, 0x00];
        assert_eq!(BeaconCodec::<u32>::decode(&payload), Some(100));
    }

    #[test]
    fn rejects_wrong_header() {
        let payload = [0xFF, 0xFF, 0x54, 0x64, 0x00, 0x00, 0x00];
        assert_eq!(BeaconCodec::<u32>::decode(&payload), None);

        let payload = [0x00, 0xFF, 0x55, 0x64, 0x00, 0x00, 0x00];
        assert_eq!(BeaconCodec::<u32>::decode(&payload), None);
    }

    #[test]
    fn rejects_wrong_length() {
        let payload = [0xFF, 0xFF, 0x55, 0x64, 0x00, 0x00];
        assert_eq!(BeaconCodec::<u32>::decode(&payload), None);

        // An 11-byte frame is valid for the f64 variant, not this one
        let payload = [0xFF, 0xFF, 0x55, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(BeaconCodec::<u32>::decode(&payload), None);
        assert_eq!(BeaconCodec::<f64>::decode(&payload), Some(0.0));
    }

    #[test]
    fn frame_lengths_match_variants() {
        assert_eq!(BeaconCodec::<u32>::FRAME_LEN, 7);
        assert_eq!(BeaconCodec::<f64>::FRAME_LEN, 11);
    }

    #[test]
    fn encode_needs_room() {
        let mut short = [0u8; 6];
        assert_eq!(BeaconCodec::<u32>::encode(1, &mut short), None);

        let mut exact = [0u8; 7];
        assert_eq!(BeaconCodec::<u32>::encode(1, &mut exact), Some(7));
        assert_eq!(exact[..3], FRAME_HEADER);
    }

    proptest! {
        #[test]
        fn any_wrong_length_rejected(payload in proptest::collection::vec(any::<u8>(), 0..32)) {
            prop_assume!(payload.len() != BeaconCodec::<u32>::FRAME_LEN);
            prop_assert!(BeaconCodec::<u32>::decode(&payload).is_none());
        }

        #[test]
        fn any_wrong_header_rejected(payload in proptest::collection::vec(any::<u8>(), 7)) {
            prop_assume!(payload[..3] != FRAME_HEADER);
            prop_assert!(BeaconCodec::<u32>::decode(&payload).is_none());
        }

        #[test]
        fn u32_round_trip(value in any::<u32>()) {
            let mut frame = [0u8; 7];
            BeaconCodec::<u32>::encode(value, &mut frame).unwrap();
            prop_assert_eq!(BeaconCodec::<u32>::decode(&frame), Some(value));
        }

        #[test]
        fn f64_round_trip_bit_for_bit(bits in any::<u64>()) {
            let value = f64::from_bits(bits);
            let mut frame = [0u8; 11];
            BeaconCodec::<f64>::encode(value, &mut frame).unwrap();
            let decoded = BeaconCodec::<f64>::decode(&frame).unwrap();
            prop_assert_eq!(decoded.to_bits(), bits);
        }
    }
}
