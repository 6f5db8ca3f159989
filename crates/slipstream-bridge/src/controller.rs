//! The aerodynamic-drag controller.
//!
//! Runs once per tick inside the host's per-robot callback. The pipeline
//! (occlusion-adjusted wind impulse, radius beacon, steering, drive,
//! deferred post-step application) is fixed; the steering decision is the
//! only injectable piece.

use thiserror::Error;
use tracing::{info, trace};

use slipstream_core::{beacon, NeighborReading, Vec2, WindVector, CM_PER_M};

use crate::accumulator::ImpulseAccumulator;
use crate::config::{DragConfig, DriveMode};
use crate::engine::{AttachError, BodyHandle, PhysicsSpace, SimulatorAdapter};
use crate::steering::{HoldCourse, SteeringPolicy};

/// Per-tick pipeline errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    /// `control_step` ran before a successful [`DragController::attach`].
    #[error("controller is not attached to a physics body")]
    NotAttached,
}

/// Wind-and-drive controller with a pluggable steering policy.
pub struct DragController<P = HoldCourse> {
    config: DragConfig,
    wind: WindVector,
    policy: P,
    body: Option<BodyHandle>,
    accumulator: ImpulseAccumulator,
}

impl DragController<HoldCourse> {
    /// Create a straight-line controller.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self::with_policy(config, HoldCourse)
    }
}

impl<P: SteeringPolicy> DragController<P> {
    /// Create a controller with a custom steering policy.
    #[must_use]
    pub fn with_policy(config: DragConfig, policy: P) -> Self {
        let wind = config.wind.to_vector();
        Self {
            config,
            wind,
            policy,
            body: None,
            accumulator: ImpulseAccumulator::new(),
        }
    }

    /// Bind to this robot's physics body. Called once during controller
    /// setup; a failure is a configuration mismatch and aborts the
    /// attachment.
    ///
    /// # Errors
    ///
    /// Propagates [`AttachError`] from the physics space.
    pub fn attach<X: PhysicsSpace>(
        &mut self,
        entity_id: &str,
        space: &mut X,
    ) -> Result<(), AttachError> {
        let body = space.attach(entity_id)?;
        info!(entity = entity_id, body = body.raw(), "bound physics body");
        self.body = Some(body);
        Ok(())
    }

    /// Whether [`attach`](Self::attach) has succeeded.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.body.is_some()
    }

    /// The configured ambient wind.
    #[must_use]
    pub fn wind(&self) -> &WindVector {
        &self.wind
    }

    /// The wind this robot currently experiences, after shielding by the
    /// neighbors visible in this tick's radio snapshot.
    #[must_use]
    pub fn effective_wind<S: SimulatorAdapter>(&self, sim: &S) -> WindVector {
        let neighbors = self.decode_neighbors(sim);
        self.config
            .occlusion
            .effective_wind(&self.wind, sim.yaw(), &neighbors)
    }

    /// Run one tick of the pipeline.
    ///
    /// # Errors
    ///
    /// [`DragError::NotAttached`] when no physics body is bound.
    pub fn control_step<S: SimulatorAdapter, X: PhysicsSpace>(
        &mut self,
        sim: &mut S,
        space: &mut X,
    ) -> Result<(), DragError> {
        let body = self.body.ok_or(DragError::NotAttached)?;
        let mass = space.mass(body);
        let yaw = sim.yaw();

        self.accumulator.begin_tick();

        // Wind impulse from the occlusion-adjusted wind (cm/s → m/s)
        let neighbors = self.decode_neighbors(sim);
        let effective = self
            .config
            .occlusion
            .effective_wind(&self.wind, yaw, &neighbors);
        self.accumulator
            .add(effective.cms * (mass * self.config.impulse_scale / CM_PER_M));

        // Advertise our own occlusion footprint for the neighbors
        sim.broadcast(&beacon::payload(self.config.self_radius));

        let wheels = self.policy.steer(yaw, &effective, self.config.velocity);
        match self.config.drive {
            DriveMode::Impulse => {
                // Wheels only steer; translation comes from the impulse
                sim.set_wheel_speeds(wheels.left_cm_s, wheels.right_cm_s);
                let forward = Vec2::from_angle(yaw);
                self.accumulator
                    .add(forward * (self.config.velocity * mass / CM_PER_M));
            }
            DriveMode::WheelVelocity => {
                sim.set_wheel_speeds(
                    self.config.velocity + wheels.left_cm_s,
                    self.config.velocity + wheels.right_cm_s,
                );
            }
        }

        let impulse = self.accumulator.take();
        space.schedule_post_step(body, impulse);
        trace!(
            jx = impulse.x,
            jy = impulse.y,
            wind_cms = effective.speed(),
            "scheduled post-step impulse"
        );
        Ok(())
    }

    fn decode_neighbors<S: SimulatorAdapter>(&self, sim: &S) -> Vec<NeighborReading> {
        sim.rab_readings()
            .iter()
            .map(|m| NeighborReading::from_message(m, self.config.self_radius))
            .collect()
    }
}
