//! Ambient wind for the drag model.
//!
//! The wind is a single world-frame vector in cm/s, constant for the whole
//! run; the host configuration provides it as an angle in degrees (0° = +X
//! axis) plus a magnitude.

use serde::{Deserialize, Serialize};

use crate::types::{Reduction, Vec2};
use crate::STILL_WIND_CMS;

/// World-frame wind vector (cm/s).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    /// Velocity components (cm/s).
    pub cms: Vec2,
}

impl WindVector {
    /// Create a wind vector from Cartesian components (cm/s).
    #[must_use]
    pub const fn new(x_cms: f32, y_cms: f32) -> Self {
        Self {
            cms: Vec2::new(x_cms, y_cms),
        }
    }

    /// Create from the configuration form: angle in degrees from the +X
    /// axis plus a magnitude in cm/s. Negative magnitudes clamp to zero.
    #[must_use]
    pub fn from_polar_deg(angle_deg: f32, magnitude_cms: f32) -> Self {
        let rad = angle_deg.to_radians();
        let mag = magnitude_cms.max(0.0);
        Self::new(mag * libm::cosf(rad), mag * libm::sinf(rad))
    }

    /// Still air.
    #[must_use]
    pub const fn still() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Wind speed (cm/s).
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.cms.magnitude()
    }

    /// Normalized wind direction; zero for still air.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        self.cms.normalized()
    }

    /// Check if this is effectively still air.
    #[must_use]
    pub fn is_still(&self) -> bool {
        self.speed() < STILL_WIND_CMS
    }

    /// The wind left over after shielding: `wind · (1 − reduction)`.
    #[must_use]
    pub fn attenuated(&self, reduction: Reduction) -> Self {
        Self {
            cms: self.cms * reduction.remaining(),
        }
    }
}
