//! Slipstream Core - Wind Occlusion Model for Robot Swarms
//!
//! This crate provides the pure model behind the aerodynamic-drag plugin: a
//! wind vector, the neighbor readings decoded from the range-and-bearing
//! radio, and the occlusion computation that turns "who is standing upwind
//! of me" into an attenuated wind vector.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Wind Occlusion Model                             │
//! │  ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────────┐  │
//! │  │ Radio Snapshot  │    │ Beacon Codec    │    │ Occlusion Profile   │  │
//! │  │ (range/bearing) │───▶│ (radius byte)   │───▶│ (coverage × wake)   │  │
//! │  └─────────────────┘    └─────────────────┘    └──────────┬──────────┘  │
//! │                                                           │             │
//! │                                                           ▼             │
//! │                                             ┌─────────────────────────┐ │
//! │                                             │ Effective Wind Vector   │ │
//! │                                             │ wind · (1 − reduction)  │ │
//! │                                             └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All geometry is in meters; wind stays in the device-native cm/s until the
//! integration layer converts it at impulse construction. Every computation
//! here is a per-tick pure function over readings the host has already
//! materialized, so the crate is `no_std`-capable.
//!
//! # Features
//!
//! - `std`: Standard library support (default)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod beacon;
pub mod occlusion;
pub mod types;
pub mod wind;

pub use occlusion::{LateralFalloff, LongitudinalFalloff, OcclusionPreset, OcclusionProfile};
pub use types::{NeighborReading, RabMessage, Reduction, Vec2};
pub use wind::WindVector;

/// Model version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Centimeters per meter; the radio reports range in cm, wind is in cm/s.
pub const CM_PER_M: f32 = 100.0;

/// Smallest advertised occlusion radius the decoder accepts (meters).
pub const MIN_BEACON_RADIUS_M: f32 = 0.005;

/// Largest advertised occlusion radius the decoder accepts (meters).
pub const MAX_BEACON_RADIUS_M: f32 = 0.200;

/// Wind speeds below this are treated as still air (cm/s).
pub const STILL_WIND_CMS: f32 = 1e-6;

/// Readings at or below this range are degenerate and never shield (meters).
pub const RANGE_EPSILON_M: f32 = 1e-4;
