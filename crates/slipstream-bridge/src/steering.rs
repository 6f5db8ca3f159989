//! Steering policies.
//!
//! The drag pipeline is fixed; what varies between controller variants is
//! only the steering decision. A policy turns the current yaw, the
//! occlusion-adjusted wind and the base speed into a differential turn
//! command, and the controller layers it onto the configured drive mode.

use core::f32::consts::PI;

use slipstream_core::{Vec2, WindVector};

/// Differential wheel command (cm/s). In impulse drive mode this is pure
/// steering; in wheel-velocity mode it rides on top of the base speed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelSpeeds {
    /// Left wheel speed (cm/s).
    pub left_cm_s: f32,
    /// Right wheel speed (cm/s).
    pub right_cm_s: f32,
}

impl WheelSpeeds {
    /// Create a wheel command.
    #[must_use]
    pub const fn new(left_cm_s: f32, right_cm_s: f32) -> Self {
        Self {
            left_cm_s,
            right_cm_s,
        }
    }

    /// No turn.
    #[must_use]
    pub const fn still() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A steering decision, evaluated once per tick.
pub trait SteeringPolicy {
    /// Compute the turn command for this tick.
    fn steer(&self, yaw: f32, effective_wind: &WindVector, base_speed_cms: f32) -> WheelSpeeds;
}

/// Keep the current heading; never turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldCourse;

impl SteeringPolicy for HoldCourse {
    fn steer(&self, _yaw: f32, _effective_wind: &WindVector, _base_speed_cms: f32) -> WheelSpeeds {
        WheelSpeeds::still()
    }
}

/// Crab into the crosswind so the ground track stays on `track`.
///
/// Picks the forward direction for which `fwd · v + wind` is parallel to
/// the desired track, then turns toward it with a proportional controller
/// on the yaw error. With impulse drive the command is an in-place
/// rotation; translation comes from the impulse pipeline.
#[derive(Clone, Copy, Debug)]
pub struct CrabTrack {
    track: Vec2,
    turn_gain: f32,
    turn_saturation: f32,
}

impl CrabTrack {
    /// Crab along `track` (normalized internally).
    #[must_use]
    pub fn new(track: Vec2) -> Self {
        Self {
            track: track.normalized(),
            turn_gain: 12.0,
            turn_saturation: 10.0,
        }
    }

    /// Set the proportional gain (cm/s per radian of yaw error).
    #[must_use]
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.turn_gain = gain;
        self
    }

    /// Set the turn-speed saturation (cm/s).
    #[must_use]
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.turn_saturation = saturation.max(0.0);
        self
    }
}

impl SteeringPolicy for CrabTrack {
    fn steer(&self, yaw: f32, effective_wind: &WindVector, base_speed_cms: f32) -> WheelSpeeds {
        let drive = base_speed_cms.max(1e-6);

        // Forward direction whose sum with the wind drift lies on the track
        let mut desired = self.track - effective_wind.cms * (1.0 / drive);
        if desired.magnitude() < 1e-9 {
            desired = self.track;
        } else {
            desired = desired.normalized();
        }

        let error = wrap_pi(desired.angle() - yaw);
        let turn = (self.turn_gain * error).clamp(-self.turn_saturation, self.turn_saturation);
        WheelSpeeds::new(-turn, turn)
    }
}

/// Normalize an angle to [−π, π].
pub(crate) fn wrap_pi(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_course_never_turns() {
        let policy = HoldCourse;
        let wind = WindVector::new(0.0, 8.0);
        assert_eq!(policy.steer(1.2, &wind, 5.0), WheelSpeeds::still());
    }

    #[test]
    fn test_crab_aligned_no_wind_no_turn() {
        // Facing west on a westward track in still air: nothing to correct.
        let policy = CrabTrack::new(Vec2::new(-1.0, 0.0));
        let cmd = policy.steer(PI, &WindVector::still(), 5.0);
        assert!(cmd.left_cm_s.abs() < 1e-4);
        assert!(cmd.right_cm_s.abs() < 1e-4);
    }

    #[test]
    fn test_crab_turns_into_crosswind() {
        // Wind pushes +Y; to track west the nose must dip southwest, a
        // positive (counterclockwise) yaw correction from a west-facing
        // pose: right wheel forward, left backward.
        let policy = CrabTrack::new(Vec2::new(-1.0, 0.0));
        let wind = WindVector::new(0.0, 5.0);
        let cmd = policy.steer(PI, &wind, 5.0);
        assert!(cmd.right_cm_s > 0.0);
        assert!(cmd.left_cm_s < 0.0);
    }

    #[test]
    fn test_crab_saturates() {
        let policy = CrabTrack::new(Vec2::new(-1.0, 0.0)).with_saturation(10.0);
        // Facing east, track west: maximum yaw error
        let cmd = policy.steer(0.0, &WindVector::still(), 5.0);
        assert!((cmd.right_cm_s.abs() - 10.0).abs() < 1e-4);
        assert!((cmd.left_cm_s + cmd.right_cm_s).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_pi() {
        assert!((wrap_pi(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_pi(-3.0 * PI) + PI).abs() < 1e-5);
        assert!((wrap_pi(0.5) - 0.5).abs() < 1e-6);
    }
}
