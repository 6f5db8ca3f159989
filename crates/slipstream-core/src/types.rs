//! Core types for the wind occlusion model.
//!
//! These types are `no_std` compatible; the host integration layer rebuilds
//! the radio snapshot every tick, so nothing here outlives a tick.

use core::ops::{Add, Mul, Neg, Sub};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::beacon;
use crate::CM_PER_M;

/// Maximum radio payload size carried per reading (bytes).
pub const MAX_RAB_PAYLOAD: usize = 8;

/// A 2D world-frame vector.
///
/// Units are whatever the caller puts in (cm/s for wind, meters for
/// geometry); the model never mixes the two in one vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Unit vector at `angle` radians from the +X axis.
    #[must_use]
    pub fn from_angle(angle_rad: f32) -> Self {
        Self::new(libm::cosf(angle_rad), libm::sinf(angle_rad))
    }

    /// Get the magnitude of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Normalize to a unit vector; zero stays zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 1e-8 {
            Self::new(self.x / mag, self.y / mag)
        } else {
            Self::zero()
        }
    }

    /// Dot product with another vector.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Angle of the vector from the +X axis, in radians.
    #[must_use]
    pub fn angle(&self) -> f32 {
        libm::atan2f(self.y, self.x)
    }

    /// Convert to nalgebra Vector2.
    #[must_use]
    pub fn to_vector2(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    /// Create from nalgebra Vector2.
    #[must_use]
    pub fn from_vector2(v: &Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Normalized shielding factor (0.0 = no shielding, 1.0 = full shielding).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Reduction(f32);

impl Reduction {
    /// Create a new reduction, clamping to [0.0, 1.0].
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// No shielding.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Full shielding.
    #[must_use]
    pub const fn full() -> Self {
        Self(1.0)
    }

    /// Get the raw value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// The stronger of two reductions. Shielding never stacks; the single
    /// most effective blocker dominates.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }

    /// The attenuation left over after this reduction (1 − value).
    #[must_use]
    pub fn remaining(&self) -> f32 {
        1.0 - self.0
    }
}

impl From<f32> for Reduction {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Reduction> for f32 {
    fn from(reduction: Reduction) -> Self {
        reduction.0
    }
}

/// One raw range-and-bearing reading, exactly as the radio device hands it
/// over: range in centimeters, bearing in the sensor frame, payload bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RabMessage {
    /// Range to the sender (centimeters, device-native).
    pub range_cm: f32,
    /// Horizontal bearing to the sender (radians, sensor frame).
    pub bearing_rad: f32,
    /// Broadcast payload; byte 0, if present, is the sender's occlusion
    /// radius in millimeters.
    pub data: heapless::Vec<u8, MAX_RAB_PAYLOAD>,
}

impl RabMessage {
    /// Create a reading from device values. Payload bytes beyond
    /// [`MAX_RAB_PAYLOAD`] are dropped.
    #[must_use]
    pub fn new(range_cm: f32, bearing_rad: f32, payload: &[u8]) -> Self {
        let mut data = heapless::Vec::new();
        for &b in payload.iter().take(MAX_RAB_PAYLOAD) {
            let _ = data.push(b);
        }
        Self {
            range_cm,
            bearing_rad,
            data,
        }
    }
}

/// A decoded neighbor, in model units. Rebuilt from the radio snapshot every
/// tick, never cached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighborReading {
    /// Range to the neighbor (meters).
    pub range_m: f32,
    /// Bearing to the neighbor (radians, sensor frame).
    pub bearing_rad: f32,
    /// The neighbor's occlusion radius (meters).
    pub radius_m: f32,
}

impl NeighborReading {
    /// Create a reading directly from model units.
    #[must_use]
    pub const fn new(range_m: f32, bearing_rad: f32, radius_m: f32) -> Self {
        Self {
            range_m,
            bearing_rad,
            radius_m,
        }
    }

    /// Decode a raw radio reading.
    ///
    /// Range converts from centimeters. The advertised radius comes from
    /// payload byte 0; a missing or out-of-window byte falls back to
    /// `fallback_radius_m` (the observer's own configured radius), an
    /// expected case for unequipped neighbors, not an error.
    #[must_use]
    pub fn from_message(msg: &RabMessage, fallback_radius_m: f32) -> Self {
        Self {
            range_m: msg.range_cm / CM_PER_M,
            bearing_rad: msg.bearing_rad,
            radius_m: beacon::radius_from_payload(&msg.data, fallback_radius_m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_magnitude() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_vec2_normalized() {
        let v = Vec2::new(0.0, 10.0);
        let n = v.normalized();
        assert!((n.y - 1.0).abs() < 0.001);
        assert!((n.magnitude() - 1.0).abs() < 0.001);
        assert_eq!(Vec2::zero().normalized(), Vec2::zero());
    }

    #[test]
    fn test_vec2_from_angle() {
        let v = Vec2::from_angle(core::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_nalgebra_round_trip() {
        let v = Vec2::new(1.5, -2.0);
        let n = v.to_vector2();
        assert_eq!(Vec2::from_vector2(&n), v);
    }

    #[test]
    fn test_reduction_clamping() {
        assert!((Reduction::new(1.5).value() - 1.0).abs() < 0.001);
        assert!(Reduction::new(-0.5).value().abs() < 0.001);
        assert!((Reduction::new(0.5).value() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_reduction_max() {
        let a = Reduction::new(0.3);
        let b = Reduction::new(0.6);
        assert_eq!(a.max(b), b);
        assert_eq!(b.max(a), b);
    }

    #[test]
    fn test_neighbor_from_message_converts_range() {
        let msg = RabMessage::new(20.0, 1.0, &[40]);
        let n = NeighborReading::from_message(&msg, 0.035);
        assert!((n.range_m - 0.20).abs() < 1e-6);
        assert!((n.radius_m - 0.040).abs() < 1e-6);
    }

    #[test]
    fn test_neighbor_from_message_fallback() {
        // No payload at all
        let msg = RabMessage::new(50.0, 0.0, &[]);
        let n = NeighborReading::from_message(&msg, 0.035);
        assert!((n.radius_m - 0.035).abs() < 1e-6);

        // Byte outside the sanity window
        let msg = RabMessage::new(50.0, 0.0, &[255]);
        let n = NeighborReading::from_message(&msg, 0.035);
        assert!((n.radius_m - 0.035).abs() < 1e-6);
    }

    #[test]
    fn test_rab_payload_truncation() {
        let msg = RabMessage::new(10.0, 0.0, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(msg.data.len(), MAX_RAB_PAYLOAD);
        assert_eq!(msg.data[0], 1);
    }
}
