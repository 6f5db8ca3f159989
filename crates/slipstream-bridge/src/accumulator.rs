//! Per-tick impulse staging.
//!
//! Wind and drive both want to push the body, but impulses applied before
//! the physics engine's collision pass get fought by its constraint solver.
//! The accumulator stages every contribution for the tick and releases the
//! sum once, for deferred post-collision application.

use slipstream_core::Vec2;

/// Where the accumulator sits in the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickPhase {
    /// Between ticks; the buffer holds stale data.
    #[default]
    Idle,
    /// Accumulating this tick's contributions.
    PreStep,
    /// The sum has been handed off for post-collision application.
    Scheduled,
}

/// A single staging vector, reset at pre-step and consumed exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImpulseAccumulator {
    sum: Vec2,
    phase: TickPhase,
}

impl ImpulseAccumulator {
    /// Create an idle accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tick: clear the buffer and open it for contributions.
    pub fn begin_tick(&mut self) {
        self.sum = Vec2::zero();
        self.phase = TickPhase::PreStep;
    }

    /// Add a contribution (kg·m/s). Only counted while the tick is open.
    pub fn add(&mut self, impulse: Vec2) {
        if self.phase == TickPhase::PreStep {
            self.sum = self.sum + impulse;
        }
    }

    /// Close the tick and release the sum for scheduling.
    ///
    /// A second call in the same tick returns zero; the sum is consumed
    /// exactly once.
    #[must_use]
    pub fn take(&mut self) -> Vec2 {
        if self.phase != TickPhase::PreStep {
            return Vec2::zero();
        }
        self.phase = TickPhase::Scheduled;
        let sum = self.sum;
        self.sum = Vec2::zero();
        sum
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Sum staged so far this tick.
    #[must_use]
    pub fn staged(&self) -> Vec2 {
        self.sum
    }
}
