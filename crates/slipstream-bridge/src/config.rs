//! Controller configuration.
//!
//! Read once at controller init from the host's configuration tree. Every
//! field has a default so a minimal configuration block works; attribute
//! names (`velocity`, `angle_deg`, `magnitude`) match what the host XML
//! exposes.

use serde::{Deserialize, Serialize};

use slipstream_core::{OcclusionProfile, WindVector};

/// How the controller's forward-motion intent reaches the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// Drive is an impulse accumulated with the wind and deferred to the
    /// post-collision hook; wheels only steer. Composes correctly with
    /// collision response. The default.
    #[default]
    Impulse,
    /// Legacy mode: drive goes straight to the differential-steering
    /// wheels and the impulse pipeline carries wind only.
    WheelVelocity,
}

/// The ambient wind block: angle in degrees (0° = +X axis) + magnitude in
/// cm/s, constant for the whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Wind direction (degrees from the +X axis).
    pub angle_deg: f32,
    /// Wind magnitude (cm/s).
    pub magnitude: f32,
}

impl WindConfig {
    /// Convert to the Cartesian wind vector the model works with.
    #[must_use]
    pub fn to_vector(&self) -> WindVector {
        WindVector::from_polar_deg(self.angle_deg, self.magnitude)
    }
}

/// Full drag-controller configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Forward speed command (cm/s).
    pub velocity: f32,
    /// This robot's own occlusion radius (meters); broadcast each tick and
    /// used as the fallback for neighbors that advertise nothing usable.
    pub self_radius: f32,
    /// Wind-impulse gain: 1 cm/s of wind adds this fraction of m·v per tick.
    pub impulse_scale: f32,
    /// Drive integration strategy.
    pub drive: DriveMode,
    /// Ambient wind.
    pub wind: WindConfig,
    /// Shielding parameterization.
    pub occlusion: OcclusionProfile,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            velocity: 5.0,
            self_radius: 0.035,
            impulse_scale: 3.5,
            drive: DriveMode::Impulse,
            wind: WindConfig::default(),
            occlusion: OcclusionProfile::default(),
        }
    }
}
