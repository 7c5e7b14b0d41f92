//! Box motion.
//!
//! The box first rises linearly from `rise_from` to `rise_to`; once it reaches
//! the top it orbits the table's vertical axis at a fixed height. Both phases are
//! pure functions of the time elapsed since the animation started.

use std::f64::consts::TAU;
use std::time::Duration;

use glam::Vec3;

use crate::config::AnimationConfig;

/// Height after `elapsed` of a linear rise.
///
/// Not clamped: past `duration` the value keeps growing, and the caller switches
/// phase on the first frame at or above `to`.
pub fn rise_height(elapsed: Duration, duration: Duration, from: f32, to: f32) -> f32 {
    if duration.is_zero() {
        return to;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (from as f64 + t * (to - from) as f64) as f32
}

/// Orbit angle in radians, in `[0, 2π)`.
pub fn orbit_angle(elapsed: Duration, period: Duration) -> f64 {
    if period.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / period.as_secs_f64() * TAU).rem_euclid(TAU)
}

/// Position on a circle of `radius` around the Y axis at `height`.
pub fn orbit_position(elapsed: Duration, period: Duration, radius: f32, height: f32) -> Vec3 {
    let angle = orbit_angle(elapsed, period);
    Vec3::new(
        (angle.cos() * radius as f64) as f32,
        height,
        (angle.sin() * radius as f64) as f32,
    )
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Rise,
    Orbit,
}

/// Stateful driver for the box position.
///
/// The phase only ever moves from `Rise` to `Orbit`.
#[derive(Debug, Clone)]
pub struct BoxAnimation {
    config: AnimationConfig,
    phase: Phase,
    position: Vec3,
}

impl BoxAnimation {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            phase: Phase::Rise,
            position: Vec3::new(0.0, config.rise_from, 0.0),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Advances to `elapsed` (since animation start) and returns the new position.
    pub fn update(&mut self, elapsed: Duration, radius: f32) -> Vec3 {
        let c = &self.config;
        match self.phase {
            Phase::Rise => {
                self.position.y = rise_height(elapsed, c.rise_duration, c.rise_from, c.rise_to);
                if self.position.y >= c.rise_to {
                    log::debug!("box reached {:.2} after {elapsed:?}; orbiting", self.position.y);
                    self.phase = Phase::Orbit;
                }
            }
            Phase::Orbit => {
                self.position = orbit_position(elapsed, c.orbit_period, radius, self.position.y);
            }
        }
        self.position
    }
}
