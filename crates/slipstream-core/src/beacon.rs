//! Beacon codec for the occlusion-radius broadcast.
//!
//! Each robot advertises its own occlusion radius once per tick as a single
//! unsigned byte: the radius in millimeters, rounded, saturating at 255 mm.
//! Byte 0 of the range-and-bearing payload carries it.

use crate::{MAX_BEACON_RADIUS_M, MIN_BEACON_RADIUS_M};

/// Payload byte that carries the advertised radius.
pub const RADIUS_BYTE: usize = 0;

/// Encode an occlusion radius (meters) into the wire byte (millimeters,
/// rounded, saturating).
#[must_use]
pub fn encode_radius(radius_m: f32) -> u8 {
    let mm = libm::roundf(radius_m * 1000.0);
    mm.clamp(0.0, 255.0) as u8
}

/// Decode a wire byte into an occlusion radius (meters).
///
/// Only values inside the sanity window ([`MIN_BEACON_RADIUS_M`],
/// [`MAX_BEACON_RADIUS_M`]) are accepted; anything else means the sender is
/// unequipped or garbled and the caller substitutes its own default.
#[must_use]
pub fn decode_radius(byte: u8) -> Option<f32> {
    let radius_m = f32::from(byte) / 1000.0;
    if (MIN_BEACON_RADIUS_M..=MAX_BEACON_RADIUS_M).contains(&radius_m) {
        Some(radius_m)
    } else {
        None
    }
}

/// The one-byte wire frame advertising `radius_m`.
#[must_use]
pub fn payload(radius_m: f32) -> [u8; 1] {
    [encode_radius(radius_m)]
}

/// Read the advertised radius out of a received payload, substituting
/// `fallback_m` when the byte is missing or outside the sanity window.
#[must_use]
pub fn radius_from_payload(data: &[u8], fallback_m: f32) -> f32 {
    data.get(RADIUS_BYTE)
        .copied()
        .and_then(decode_radius)
        .unwrap_or(fallback_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(encode_radius(0.085), 85);
        let decoded = decode_radius(85).unwrap();
        assert!((decoded - 0.085).abs() < 0.001);
    }

    #[test]
    fn test_encode_saturates() {
        assert_eq!(encode_radius(0.255), 255);
        assert_eq!(encode_radius(0.400), 255);
        assert_eq!(encode_radius(-0.01), 0);
    }

    #[test]
    fn test_encode_rounds() {
        // 35.4 mm rounds down, 35.6 mm rounds up
        assert_eq!(encode_radius(0.0354), 35);
        assert_eq!(encode_radius(0.0356), 36);
    }

    #[test]
    fn test_decode_sanity_window() {
        assert!(decode_radius(4).is_none()); // below 5 mm
        assert!(decode_radius(5).is_some());
        assert!(decode_radius(200).is_some());
        assert!(decode_radius(201).is_none()); // above 200 mm
        assert!(decode_radius(0).is_none());
    }

    #[test]
    fn test_radius_from_payload_fallback() {
        assert!((radius_from_payload(&[], 0.035) - 0.035).abs() < 1e-6);
        assert!((radius_from_payload(&[250], 0.035) - 0.035).abs() < 1e-6);
        assert!((radius_from_payload(&[40, 7], 0.035) - 0.040).abs() < 1e-6);
    }

    #[test]
    fn test_payload_frame() {
        assert_eq!(payload(0.085), [85]);
    }
}
