//! Slipstream Bridge - Host Simulator Integration
//!
//! This crate wires the wind-occlusion model into a host simulator's
//! per-robot tick. The host owns the simulation loop, the 2D physics
//! engine and the devices; this crate owns the per-tick pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Per-Tick Drag Pipeline                           │
//! │                                                                         │
//! │  ┌──────────────┐    ┌───────────────────┐    ┌────────────────────┐    │
//! │  │ Radio + Pose │    │ Occlusion Model    │    │ Impulse Accumulator│    │
//! │  │ snapshot     │───▶│ (slipstream-core)  │───▶│ wind + drive       │    │
//! │  └──────────────┘    └───────────────────┘    └─────────┬──────────┘    │
//! │                                                          │              │
//! │                 ┌──────────────────┐                     ▼              │
//! │                 │ Steering Policy  │          ┌────────────────────┐    │
//! │                 │ (hold / crab)    │─wheels──▶│ Post-Step Hook     │    │
//! │                 └──────────────────┘          │ (after collisions) │    │
//! │                                               └────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deferring the impulse to the post-collision hook keeps the host's
//! constraint solver from fighting it; the next tick sees the wind and
//! drive as already-integrated velocity.
//!
//! # Example
//!
//! ```rust,ignore
//! use slipstream_bridge::{DragConfig, DragController};
//!
//! let mut controller = DragController::new(DragConfig::default());
//!
//! // Once, during controller setup; a missing physics model is fatal
//! controller.attach("fb0", &mut space)?;
//!
//! // Every tick, from the host's controller callback
//! controller.control_step(&mut sim, &mut space)?;
//! ```

#![warn(missing_docs)]

pub mod accumulator;
pub mod config;
pub mod controller;
pub mod engine;
pub mod steering;
pub mod swarm;

pub use accumulator::{ImpulseAccumulator, TickPhase};
pub use config::{DragConfig, DriveMode, WindConfig};
pub use controller::{DragController, DragError};
pub use engine::{AttachError, BodyHandle, PhysicsSpace, ProximityReading, SimulatorAdapter};
pub use steering::{CrabTrack, HoldCourse, SteeringPolicy, WheelSpeeds};
pub use swarm::{SwarmConfig, SwarmController, SwarmState};
