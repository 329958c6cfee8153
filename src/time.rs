//! Simulation clock.
//!
//! Time scale is how many simulation days pass per real-world second, so
//! scale=1.0 means 1 sim-day per real-second. Paused is simply rate 0.

use std::f64::consts::TAU;

use crate::types::{SECONDS_PER_DAY, SimInstant};

/// Current simulated instant plus a signed rate in sim-days per real second.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    instant: SimInstant,
    rate: f64,
    /// Last non-zero rate, restored by [`resume`](Self::resume).
    resume_rate: f64,
    start: SimInstant,
}

impl SimulationClock {
    pub fn new(start: SimInstant, rate: f64) -> Self {
        Self {
            instant: start,
            rate,
            resume_rate: if rate != 0.0 { rate } else { 1.0 },
            start,
        }
    }

    pub fn instant(&self) -> SimInstant {
        self.instant
    }

    /// Instant the clock was created at.
    pub fn start(&self) -> SimInstant {
        self.start
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_paused(&self) -> bool {
        self.rate == 0.0
    }

    /// Instant after `elapsed_real_seconds` at the current rate, without
    /// moving the clock. Zero elapsed time returns the current instant exactly.
    pub fn advanced_by(&self, elapsed_real_seconds: f64) -> SimInstant {
        if elapsed_real_seconds == 0.0 || self.rate == 0.0 {
            return self.instant;
        }
        let dt = elapsed_real_seconds * self.rate * SECONDS_PER_DAY;
        SimInstant::from_j2000_seconds(self.instant.j2000_seconds() + dt)
    }

    pub fn advance(&mut self, elapsed_real_seconds: f64) {
        self.instant = self.advanced_by(elapsed_real_seconds);
    }

    pub fn set_instant(&mut self, instant: SimInstant) {
        self.instant = instant;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        if rate != 0.0 {
            self.resume_rate = rate;
        }
    }

    pub fn pause(&mut self) {
        self.rate = 0.0;
    }

    pub fn resume(&mut self) {
        if self.rate == 0.0 {
            self.rate = self.resume_rate;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }
}

/// Spin angle in `[0, 2π)` of a body with the given sidereal period.
///
/// Derived from the instant alone, so running the clock backwards spins
/// bodies backwards.
pub fn rotation_phase(instant: SimInstant, period_hours: f64) -> f64 {
    let period_seconds = period_hours * 3600.0;
    let phase = (TAU * instant.j2000_seconds() / period_seconds).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if phase >= TAU { 0.0 } else { phase }
}
