//! Wind shielding between robots.
//!
//! A neighbor standing upwind of a robot blocks part of the airflow. The
//! reduction it produces is the product of a lateral coverage term (how far
//! the neighbor sits off the wind centerline, in units of its advertised
//! occlusion radius) and a longitudinal wake term (how far upwind it sits).
//! The single most effective blocker wins; shielding never stacks.

use serde::{Deserialize, Serialize};

use crate::types::{NeighborReading, Reduction, Vec2};
use crate::wind::WindVector;
use crate::RANGE_EPSILON_M;

/// Lateral coverage falloff away from the wind centerline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralFalloff {
    /// Hard linear cutoff, zero at `lateral_width` radii off-axis.
    Linear,
    /// Gaussian with σ = `lateral_width` radii; smoother shielding edges.
    Gaussian,
}

/// Wake decay with along-wind distance behind the blocker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudinalFalloff {
    /// 1/√(1 + s/(wake_length·radius)); long tail, shields at range.
    InverseSqrt,
    /// 1 − smoothstep over `wake_length` radii; cuts off cleanly.
    Smoothstep,
}

/// Named shielding parameterizations.
///
/// The falloff shape and its constants are a configuration-level choice,
/// not a compiled-in constant; these presets are the tuned combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcclusionPreset {
    /// Earliest parameterization: linear coverage, inverse-sqrt wake.
    Legacy,
    /// Gaussian coverage with a smoothstep wake. The default.
    Smooth,
    /// `Smooth` plus a gamma boost toward stronger mid-range shielding.
    Boosted,
}

impl Default for OcclusionPreset {
    fn default() -> Self {
        Self::Smooth
    }
}

/// Tunable shielding model.
///
/// All length scales are multiples of the blocker's advertised occlusion
/// radius, so a bigger robot casts a proportionally wider and longer wake.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcclusionProfile {
    /// Lateral coverage shape.
    pub lateral: LateralFalloff,
    /// Wake decay shape.
    pub longitudinal: LongitudinalFalloff,
    /// Coverage width in blocker radii (σ for Gaussian, edge for Linear).
    pub lateral_width: f32,
    /// Wake length in blocker radii.
    pub wake_length: f32,
    /// Gamma remap exponent; 1.0 disables it, larger values bias toward
    /// stronger mid-range shielding.
    pub gamma: f32,
}

impl Default for OcclusionProfile {
    fn default() -> Self {
        Self::from_preset(OcclusionPreset::Smooth)
    }
}

impl OcclusionProfile {
    /// Build a profile from a named preset.
    #[must_use]
    pub fn from_preset(preset: OcclusionPreset) -> Self {
        match preset {
            OcclusionPreset::Legacy => Self {
                lateral: LateralFalloff::Linear,
                longitudinal: LongitudinalFalloff::InverseSqrt,
                lateral_width: 1.0,
                wake_length: 1.0,
                gamma: 1.0,
            },
            OcclusionPreset::Smooth => Self {
                lateral: LateralFalloff::Gaussian,
                longitudinal: LongitudinalFalloff::Smoothstep,
                lateral_width: 2.0,
                wake_length: 12.0,
                gamma: 1.0,
            },
            OcclusionPreset::Boosted => Self {
                gamma: 2.0,
                ..Self::from_preset(OcclusionPreset::Smooth)
            },
        }
    }

    /// Set the gamma exponent (clamped to ≥ 1).
    #[must_use]
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma.max(1.0);
        self
    }

    /// Shielding produced by a single neighbor.
    ///
    /// `wdir` must be the unit wind direction; `self_yaw` converts the
    /// sensor-frame bearing to world frame. Downwind neighbors (along-wind
    /// projection ≤ 0) and degenerate readings contribute nothing.
    #[must_use]
    pub fn neighbor_reduction(
        &self,
        wdir: Vec2,
        self_yaw: f32,
        neighbor: &NeighborReading,
    ) -> Reduction {
        if neighbor.range_m <= RANGE_EPSILON_M || neighbor.radius_m <= f32::EPSILON {
            return Reduction::zero();
        }

        // Neighbor-to-self vector in world frame
        let world_bearing = self_yaw + neighbor.bearing_rad;
        let r = -(Vec2::from_angle(world_bearing) * neighbor.range_m);

        // Only neighbors upwind of this robot can shield it
        let s = r.dot(&wdir);
        if s <= 0.0 {
            return Reduction::zero();
        }

        let lateral = r - wdir * s;
        let lat = lateral.magnitude();
        let radius = neighbor.radius_m;

        let coverage = match self.lateral {
            LateralFalloff::Linear => (1.0 - lat / (self.lateral_width * radius)).max(0.0),
            LateralFalloff::Gaussian => {
                let sigma = self.lateral_width * radius;
                libm::expf(-(lat * lat) / (2.0 * sigma * sigma))
            }
        };

        let wake = match self.longitudinal {
            LongitudinalFalloff::InverseSqrt => {
                1.0 / libm::sqrtf(1.0 + s / (self.wake_length * radius))
            }
            LongitudinalFalloff::Smoothstep => 1.0 - smoothstep(self.wake_length * radius, s),
        };

        let mut reduction = (coverage * wake).clamp(0.0, 1.0);
        if self.gamma > 1.0 {
            reduction = 1.0 - libm::powf(1.0 - reduction, self.gamma);
        }
        Reduction::new(reduction)
    }

    /// Combined shielding over a tick's neighbor snapshot: the maximum
    /// single-neighbor reduction, not a sum.
    #[must_use]
    pub fn reduction(
        &self,
        wind: &WindVector,
        self_yaw: f32,
        neighbors: &[NeighborReading],
    ) -> Reduction {
        if wind.is_still() {
            return Reduction::zero();
        }
        let wdir = wind.direction();
        neighbors
            .iter()
            .map(|n| self.neighbor_reduction(wdir, self_yaw, n))
            .fold(Reduction::zero(), Reduction::max)
    }

    /// Occlusion-adjusted wind as experienced by this robot.
    #[must_use]
    pub fn effective_wind(
        &self,
        wind: &WindVector,
        self_yaw: f32,
        neighbors: &[NeighborReading],
    ) -> WindVector {
        wind.attenuated(self.reduction(wind, self_yaw, neighbors))
    }
}

/// Hermite smoothstep over [0, edge].
fn smoothstep(edge: f32, x: f32) -> f32 {
    let t = (x / edge).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
