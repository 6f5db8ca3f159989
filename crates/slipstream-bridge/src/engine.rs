//! Host Simulator Integration API
//!
//! This module provides the traits the host runtime implements to let the
//! drag controllers run inside its simulation loop. The host owns the tick
//! scheduler, the 2D physics engine, and every device; the controllers only
//! see these two narrow surfaces:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Host Runtime (per-robot tick)                    │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │ RAB Radio    │  │ Positioning  │  │ Diff. Wheels │  │ Physics 2D  │  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘  └──────┬──────┘  │
//! └─────────┼─────────────────┼─────────────────┼─────────────────┼─────────┘
//!           ▼                 ▼                 ▼                 ▼
//!    ┌──────────────────────────────────────────────┐  ┌──────────────────┐
//!    │              SimulatorAdapter                 │  │   PhysicsSpace   │
//!    └──────────────────────────────────────────────┘  └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slipstream_core::{RabMessage, Vec2};

/// Opaque handle to a rigid body owned by the host physics engine.
///
/// Written exactly once per controller at attach time; idempotent
/// thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(u32);

impl BodyHandle {
    /// Wrap a host-assigned body index.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the host-assigned index back.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Fatal errors while binding a controller to its physics body.
///
/// These indicate a simulation-setup mismatch (wrong physics engine plugged
/// in, misspelled entity id) and are never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachError {
    /// The entity exists but carries no 2D dynamics model.
    #[error("no 2D dynamics model for entity `{entity}`")]
    NoPhysicsModel {
        /// Id of the entity that was looked up.
        entity: String,
    },
    /// The entity id is unknown to the simulation space.
    #[error("entity `{entity}` not found in the simulation space")]
    UnknownEntity {
        /// Id of the entity that was looked up.
        entity: String,
    },
}

/// The physics engine surface the impulse pipeline consumes.
pub trait PhysicsSpace {
    /// Resolve the rigid body behind `entity_id`.
    ///
    /// Called once during controller setup. A failure here is fatal to the
    /// controller's attachment.
    ///
    /// # Errors
    ///
    /// [`AttachError`] when the entity is unknown or has no 2D dynamics
    /// model.
    fn attach(&mut self, entity_id: &str) -> Result<BodyHandle, AttachError>;

    /// Mass of the body (kg).
    fn mass(&self, body: BodyHandle) -> f32;

    /// Apply an impulse (kg·m/s) at the body's center of mass, immediately.
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    /// Queue an impulse (kg·m/s) for application at the body's center of
    /// mass after this tick's collision pass.
    ///
    /// The host guarantees the deferred application runs on the same
    /// thread, after collision resolution and before the next tick, exactly
    /// once per registration.
    fn schedule_post_step(&mut self, body: BodyHandle, impulse: Vec2);
}

/// One proximity sensor reading: activation value at a sensor angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityReading {
    /// Sensor angle in the robot frame (radians).
    pub angle_rad: f32,
    /// Activation value; larger means closer.
    pub value: f32,
}

/// The device surface the host exposes to a controller each tick.
///
/// Readings are snapshots the host materialized for this tick; a robot sees
/// what its neighbors broadcast on a prior step, never an instantaneously
/// consistent view.
pub trait SimulatorAdapter {
    /// Current yaw (radians), decomposed from the orientation sensor.
    fn yaw(&self) -> f32;

    /// This tick's range-and-bearing snapshot.
    fn rab_readings(&self) -> &[RabMessage];

    /// Broadcast a payload over the range-and-bearing radio.
    fn broadcast(&mut self, payload: &[u8]);

    /// Command the differential-steering wheels (cm/s).
    fn set_wheel_speeds(&mut self, left_cm_s: f32, right_cm_s: f32);

    /// This tick's proximity snapshot.
    fn proximity_readings(&self) -> &[ProximityReading];

    /// Toggle the body LED.
    fn set_body_led(&mut self, lit: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_handle_round_trip() {
        let handle = BodyHandle::new(7);
        assert_eq!(handle.raw(), 7);
        assert_eq!(handle, BodyHandle::new(7));
    }

    #[test]
    fn test_attach_error_display() {
        let err = AttachError::NoPhysicsModel {
            entity: "fb12".into(),
        };
        assert_eq!(err.to_string(), "no 2D dynamics model for entity `fb12`");
    }
}
