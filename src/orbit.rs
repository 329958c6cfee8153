//! Orbit path sampling.
//!
//! A path covers one revolution anchored at a reference instant and is
//! closed: the last point lands back on the first. The revolution normally
//! starts at the reference; when that runs past the end of the provider's
//! span, the revolution ending at the reference is traced instead. Paths
//! are sampled at startup and on request, never per frame.

use bevy::math::Vec3;

use crate::bodies::{Body, ConfigurationError};
use crate::ephemeris::{BodyId, EphemerisError, EphemerisProvider};
use crate::error::SimulationError;
use crate::placement::{Placement, locate};
use crate::types::SimInstant;

/// Samples per revolution unless configured otherwise.
pub const DEFAULT_ORBIT_SAMPLES: usize = 360;

/// Sampled orbit path in display units.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPolyline {
    /// `sample_count + 1` points; the last closes the loop.
    pub points: Vec<Vec3>,
    /// Points are offsets from the parent, to be translated every frame.
    pub parent_relative: bool,
    /// Instant the path was sampled for; one of its ends.
    pub reference: SimInstant,
    /// Instant of the first point.
    pub start: SimInstant,
}

impl OrbitPolyline {
    /// Points in display space, with parent-relative paths moved to `anchor`.
    pub fn translated(&self, anchor: Vec3) -> impl Iterator<Item = Vec3> + '_ {
        let shift = if self.parent_relative { anchor } else { Vec3::ZERO };
        self.points.iter().map(move |p| *p + shift)
    }

    /// Longest distance between consecutive points.
    pub fn max_step(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f32::max)
    }
}

/// Samples one revolution of a body's orbit.
#[derive(Clone, Copy, Debug)]
pub struct OrbitSampler {
    sample_count: usize,
}

impl Default for OrbitSampler {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_ORBIT_SAMPLES,
        }
    }
}

impl OrbitSampler {
    pub fn new(sample_count: usize) -> Result<Self, ConfigurationError> {
        if sample_count == 0 {
            return Err(ConfigurationError::ZeroSampleCount);
        }
        Ok(Self { sample_count })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Sample one revolution of `body`'s orbit anchored at `reference`.
    ///
    /// Returns `None` for the Sun, which has no orbit to draw.
    pub fn sample(
        &self,
        body: &Body,
        provider: &dyn EphemerisProvider,
        reference: SimInstant,
    ) -> Result<Option<OrbitPolyline>, SimulationError> {
        let period_days = match body.orbital_period_days {
            Some(days) if days.is_finite() && days > 0.0 => days,
            Some(days) => {
                return Err(ConfigurationError::InvalidPeriod { body: body.id, days }.into());
            }
            None if body.id == BodyId::Sun => return Ok(None),
            None => return Err(ConfigurationError::MissingPeriod(body.id).into()),
        };

        let step_days = period_days / self.sample_count as f64;
        let (start, points) = match self.sample_from(body, provider, reference, step_days) {
            Ok(points) => (reference, points),
            Err(SimulationError::Ephemeris(EphemerisError::OutOfRange { .. })) => {
                let start = reference.plus_days(-period_days);
                (start, self.sample_from(body, provider, start, step_days)?)
            }
            Err(err) => return Err(err),
        };

        Ok(Some(OrbitPolyline {
            points,
            parent_relative: body.parent.is_some(),
            reference,
            start,
        }))
    }

    fn sample_from(
        &self,
        body: &Body,
        provider: &dyn EphemerisProvider,
        start: SimInstant,
        step_days: f64,
    ) -> Result<Vec<Vec3>, SimulationError> {
        (0..=self.sample_count)
            .map(|i| -> Result<Vec3, SimulationError> {
                let instant = start.plus_days(i as f64 * step_days);
                Ok(match locate(body, provider, instant)? {
                    Placement::Absolute(position) => position,
                    Placement::Offset(offset) => offset,
                })
            })
            .collect()
    }
}
