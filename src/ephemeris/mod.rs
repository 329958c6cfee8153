//! Ephemeris module for computing celestial body positions.
//!
//! The simulation only talks to the [`EphemerisProvider`] trait. The crate
//! ships [`KeplerEphemeris`], an analytic provider built from the element
//! tables in [`data`].
//!
//! Coordinate frame:
//! - 3D J2000 ecliptic, z towards ecliptic north.
//! - Heliocentric queries return AU, parent-relative queries return km.

pub mod data;
pub mod kepler;

#[cfg(test)]
mod proptest_ephemeris;

pub use data::{BodyId, OrbitCenter};

use std::collections::HashMap;

use bevy::math::DVec3;

use crate::types::{AU_KM, DAYS_PER_JULIAN_YEAR, SimInstant};

/// Errors returned by ephemeris queries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("instant {instant} is outside the ephemeris span {start} .. {end}")]
    OutOfRange {
        instant: SimInstant,
        start: SimInstant,
        end: SimInstant,
    },
    #[error("no ephemeris data for {0}")]
    UnknownBody(BodyId),
}

/// Source of body positions.
///
/// Implementations must be deterministic pure functions of `(body, instant)`.
pub trait EphemerisProvider: Send + Sync {
    /// Position relative to the Sun, in AU.
    fn heliocentric_position(
        &self,
        body: BodyId,
        instant: SimInstant,
    ) -> Result<DVec3, EphemerisError>;

    /// Position relative to the body's primary, in km.
    ///
    /// For a moon the primary is its planet; for a planet it is the Sun.
    fn relative_position(&self, body: BodyId, instant: SimInstant)
    -> Result<DVec3, EphemerisError>;

    /// The body a relative query is centred on, `None` when the provider
    /// tracks the body heliocentrically.
    fn primary(&self, body: BodyId) -> Result<Option<BodyId>, EphemerisError>;
}

/// Analytic provider backed by Keplerian elements.
pub struct KeplerEphemeris {
    tracks: HashMap<BodyId, data::OrbitTrack>,
    start: SimInstant,
    end: SimInstant,
}

impl Default for KeplerEphemeris {
    fn default() -> Self {
        Self::new()
    }
}

impl KeplerEphemeris {
    /// Default validity span, in Julian years either side of J2000.
    pub const SPAN_YEARS: f64 = 1000.0;

    /// Create a provider for every body in the built-in tables.
    pub fn new() -> Self {
        Self::with_span_years(Self::SPAN_YEARS)
    }

    /// Create a provider valid for `years` either side of J2000.
    pub fn with_span_years(years: f64) -> Self {
        let days = years * DAYS_PER_JULIAN_YEAR;
        Self::with_span(SimInstant::J2000.plus_days(-days), SimInstant::J2000.plus_days(days))
    }

    /// Create a provider valid over `[start, end]`.
    pub fn with_span(start: SimInstant, end: SimInstant) -> Self {
        let mut tracks = HashMap::new();
        for &id in BodyId::PLANETS.iter().chain(BodyId::MOONS) {
            if let Some(track) = data::orbit_track(id) {
                tracks.insert(id, track);
            }
        }
        Self { tracks, start, end }
    }

    /// First and last instant the provider answers for.
    pub fn span(&self) -> (SimInstant, SimInstant) {
        (self.start, self.end)
    }

    fn check_range(&self, instant: SimInstant) -> Result<(), EphemerisError> {
        if instant >= self.start && instant <= self.end {
            Ok(())
        } else {
            Err(EphemerisError::OutOfRange {
                instant,
                start: self.start,
                end: self.end,
            })
        }
    }

    fn track(&self, body: BodyId) -> Result<Option<&data::OrbitTrack>, EphemerisError> {
        if body == BodyId::Sun {
            return Ok(None);
        }
        self.tracks
            .get(&body)
            .map(Some)
            .ok_or(EphemerisError::UnknownBody(body))
    }
}

impl EphemerisProvider for KeplerEphemeris {
    fn heliocentric_position(
        &self,
        body: BodyId,
        instant: SimInstant,
    ) -> Result<DVec3, EphemerisError> {
        self.check_range(instant)?;
        let Some(track) = self.track(body)? else {
            return Ok(DVec3::ZERO);
        };

        let local = track.orbit.position(instant.days_since_j2000());
        match track.center {
            OrbitCenter::Sun => Ok(local),
            OrbitCenter::Primary(parent) => {
                let parent_pos = self.heliocentric_position(parent, instant)?;
                Ok(parent_pos + local / AU_KM)
            }
        }
    }

    fn relative_position(
        &self,
        body: BodyId,
        instant: SimInstant,
    ) -> Result<DVec3, EphemerisError> {
        self.check_range(instant)?;
        let Some(track) = self.track(body)? else {
            return Ok(DVec3::ZERO);
        };

        let local = track.orbit.position(instant.days_since_j2000());
        match track.center {
            OrbitCenter::Sun => Ok(local * AU_KM),
            OrbitCenter::Primary(_) => Ok(local),
        }
    }

    fn primary(&self, body: BodyId) -> Result<Option<BodyId>, EphemerisError> {
        Ok(self.track(body)?.and_then(|track| match track.center {
            OrbitCenter::Sun => None,
            OrbitCenter::Primary(parent) => Some(parent),
        }))
    }
}
