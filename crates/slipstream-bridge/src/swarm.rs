//! Swarm spacing controller.
//!
//! Keeps a robot at a target distance from its radio neighbors: the
//! range-and-bearing snapshot is reduced to one displacement sum (too-far
//! neighbors pull, too-close neighbors push), and the heading error drives
//! either a small in-course wheel offset or a timed in-place rotation.
//! Proximity hits preempt everything with an avoidance turn.

use serde::{Deserialize, Serialize};
use tracing::debug;

use slipstream_core::{beacon, RabMessage};

use crate::engine::{ProximityReading, SimulatorAdapter};

/// Swarm controller parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Cruise wheel speed (cm/s).
    pub speed: f32,
    /// In-place rotation wheel speed (cm/s).
    pub rotation_speed: f32,
    /// Target neighbor distance (cm).
    pub spacing: f32,
    /// Proximity activation that triggers an avoidance turn.
    pub collision_threshold: f32,
    /// Heading errors inside this window (degrees) are corrected in course
    /// with a wheel offset instead of a rotation.
    pub align_window_deg: f32,
    /// This robot's occlusion radius (meters), advertised each tick so
    /// drag-controlled robots can shield behind swarm members too.
    pub self_radius: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_speed: 2.0,
            spacing: 25.0,
            collision_threshold: 500.0,
            align_window_deg: 15.0,
            self_radius: 0.035,
        }
    }
}

/// Controller mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwarmState {
    /// Cruising with small in-course corrections.
    #[default]
    Moving,
    /// Turning in place until the rotation timer expires.
    Rotating,
}

/// Per-robot swarm spacing state machine.
#[derive(Debug)]
pub struct SwarmController {
    config: SwarmConfig,
    state: SwarmState,
    rotation_until: f32,
}

impl SwarmController {
    /// Create a controller in the moving state.
    #[must_use]
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            state: SwarmState::Moving,
            rotation_until: 0.0,
        }
    }

    /// Return to the initial state (host-triggered simulation reset).
    pub fn reset(&mut self) {
        self.state = SwarmState::Moving;
        self.rotation_until = 0.0;
    }

    /// Current mode.
    #[must_use]
    pub fn state(&self) -> SwarmState {
        self.state
    }

    /// Ticks needed to rotate `degrees` in place at `speed` cm/s.
    #[must_use]
    pub fn rotation_ticks(speed_cm_s: f32, degrees: f32) -> f32 {
        162.0 / speed_cm_s * degrees.abs() / 360.0
    }

    /// Run one tick.
    pub fn control_step<S: SimulatorAdapter>(&mut self, tick: u64, sim: &mut S) {
        sim.broadcast(&beacon::payload(self.config.self_radius));

        match self.state {
            SwarmState::Moving => {
                sim.set_body_led(false);
                if let Some(heading) = self.collision_heading_deg(sim.proximity_readings()) {
                    debug!(heading, "obstacle, avoidance turn");
                    self.start_rotation(tick, heading, sim);
                    return;
                }

                let error = self.spacing_error_deg(sim.rab_readings());
                if error.abs() < self.config.align_window_deg {
                    // Small error: correct in course with a wheel offset
                    let offset = error / self.config.align_window_deg * 0.2;
                    sim.set_wheel_speeds(
                        self.config.speed * (1.0 - offset),
                        self.config.speed * (1.0 + offset),
                    );
                } else {
                    self.start_rotation(tick, error, sim);
                }
            }
            SwarmState::Rotating => {
                sim.set_body_led(true);
                if tick as f32 > self.rotation_until {
                    self.state = SwarmState::Moving;
                }
            }
        }
    }

    fn start_rotation<S: SimulatorAdapter>(&mut self, tick: u64, heading_deg: f32, sim: &mut S) {
        self.rotation_until =
            tick as f32 + Self::rotation_ticks(self.config.rotation_speed, heading_deg);
        self.state = SwarmState::Rotating;

        let v = self.config.rotation_speed;
        if heading_deg < 0.0 {
            sim.set_wheel_speeds(v, -v);
        } else {
            sim.set_wheel_speeds(-v, v);
        }
    }

    /// Heading correction (degrees, bearing-relative) toward the point that
    /// restores the target spacing: each neighbor contributes its distance
    /// error along its bearing.
    fn spacing_error_deg(&self, readings: &[RabMessage]) -> f32 {
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        for msg in readings {
            let error_cm = msg.range_cm - self.config.spacing;
            x += error_cm * libm::sinf(msg.bearing_rad);
            y += error_cm * libm::cosf(msg.bearing_rad);
        }
        if x == 0.0 && y == 0.0 {
            0.0
        } else {
            libm::atan2f(x, y).to_degrees()
        }
    }

    /// Net obstacle direction (degrees) from the proximity ring, or `None`
    /// when nothing is over the threshold.
    fn collision_heading_deg(&self, readings: &[ProximityReading]) -> Option<f32> {
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        for r in readings {
            if r.value > self.config.collision_threshold {
                x -= r.value * libm::cosf(r.angle_rad);
                y -= r.value * libm::sinf(r.angle_rad);
            }
        }
        if x == 0.0 && y == 0.0 {
            None
        } else {
            Some(libm::atan2f(y, x).to_degrees())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[derive(Default)]
    struct MockSim {
        readings: Vec<RabMessage>,
        prox: Vec<ProximityReading>,
        wheels: Vec<(f32, f32)>,
        broadcasts: Vec<Vec<u8>>,
        led: bool,
    }

    impl SimulatorAdapter for MockSim {
        fn yaw(&self) -> f32 {
            0.0
        }

        fn rab_readings(&self) -> &[RabMessage] {
            &self.readings
        }

        fn broadcast(&mut self, payload: &[u8]) {
            self.broadcasts.push(payload.to_vec());
        }

        fn set_wheel_speeds(&mut self, left_cm_s: f32, right_cm_s: f32) {
            self.wheels.push((left_cm_s, right_cm_s));
        }

        fn proximity_readings(&self) -> &[ProximityReading] {
            &self.prox
        }

        fn set_body_led(&mut self, lit: bool) {
            self.led = lit;
        }
    }

    #[test]
    fn test_rotation_ticks_formula() {
        assert!((SwarmController::rotation_ticks(2.0, 180.0) - 40.5).abs() < 1e-4);
        assert!((SwarmController::rotation_ticks(2.0, -180.0) - 40.5).abs() < 1e-4);
        assert!(SwarmController::rotation_ticks(2.0, 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_spacing_pulls_toward_far_neighbor() {
        let controller = SwarmController::new(SwarmConfig::default());
        // Neighbor 15 cm beyond the target spacing, off to the left
        let readings = [RabMessage::new(40.0, FRAC_PI_2, &[])];
        let error = controller.spacing_error_deg(&readings);
        assert!((error - 90.0).abs() < 0.5);
    }

    #[test]
    fn test_spacing_pushes_from_close_neighbor() {
        let controller = SwarmController::new(SwarmConfig::default());
        // Same bearing, but 15 cm inside the target spacing
        let readings = [RabMessage::new(10.0, FRAC_PI_2, &[])];
        let error = controller.spacing_error_deg(&readings);
        assert!((error + 90.0).abs() < 0.5);
    }

    #[test]
    fn test_spacing_balanced_is_zero() {
        let controller = SwarmController::new(SwarmConfig::default());
        assert!(controller.spacing_error_deg(&[]).abs() < 1e-6);
        // Neighbor exactly at the target distance
        let readings = [RabMessage::new(25.0, 1.0, &[])];
        assert!(controller.spacing_error_deg(&readings).abs() < 1e-4);
    }

    #[test]
    fn test_small_error_corrects_in_course() {
        let mut controller = SwarmController::new(SwarmConfig::default());
        let mut sim = MockSim::default();
        // Slightly too far, slightly left: small positive error
        sim.readings = vec![RabMessage::new(26.0, 0.2, &[])];

        controller.control_step(0, &mut sim);
        assert_eq!(controller.state(), SwarmState::Moving);
        assert!(!sim.led);

        let (left, right) = sim.wheels[0];
        assert!(right > left, "should ease left toward the neighbor");
        assert!(left > 0.0);
    }

    #[test]
    fn test_large_error_rotates_with_timer() {
        let config = SwarmConfig::default();
        let mut controller = SwarmController::new(config);
        let mut sim = MockSim::default();
        // Far neighbor straight behind: ±180° error
        sim.readings = vec![RabMessage::new(80.0, core::f32::consts::PI, &[])];

        controller.control_step(0, &mut sim);
        assert_eq!(controller.state(), SwarmState::Rotating);

        // Spin in place
        let (left, right) = sim.wheels[0];
        assert!((left + right).abs() < 1e-5);
        assert!((left.abs() - config.rotation_speed).abs() < 1e-5);

        // LED comes on while rotating, and the timer eventually expires
        controller.control_step(1, &mut sim);
        assert!(sim.led);
        let done = SwarmController::rotation_ticks(config.rotation_speed, 180.0) as u64 + 2;
        controller.control_step(done, &mut sim);
        assert_eq!(controller.state(), SwarmState::Moving);
    }

    #[test]
    fn test_proximity_preempts_spacing() {
        let mut controller = SwarmController::new(SwarmConfig::default());
        let mut sim = MockSim::default();
        sim.readings = vec![RabMessage::new(26.0, 0.1, &[])];
        sim.prox = vec![ProximityReading {
            angle_rad: 0.0,
            value: 900.0,
        }];

        controller.control_step(0, &mut sim);
        assert_eq!(controller.state(), SwarmState::Rotating);
    }

    #[test]
    fn test_below_threshold_proximity_ignored() {
        let controller = SwarmController::new(SwarmConfig::default());
        let readings = [ProximityReading {
            angle_rad: 0.3,
            value: 100.0,
        }];
        assert!(controller.collision_heading_deg(&readings).is_none());
    }

    #[test]
    fn test_broadcasts_beacon_every_tick() {
        let mut controller = SwarmController::new(SwarmConfig::default());
        let mut sim = MockSim::default();
        controller.control_step(0, &mut sim);
        controller.control_step(1, &mut sim);
        assert_eq!(sim.broadcasts, vec![vec![35], vec![35]]);
    }
}
