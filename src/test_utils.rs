//! Test utilities for simulation tests.
//!
//! Provides a synthetic ephemeris with exactly circular, coplanar orbits so
//! expected positions can be written down by hand.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::bodies::{Body, BodyRegistry};
use crate::ephemeris::{BodyId, EphemerisError, EphemerisProvider};
use crate::types::{AU_KM, SimInstant};

/// Fixtures for creating test catalogs and providers.
pub mod fixtures {
    use super::*;

    /// Circular orbit: radius (AU for planets, km for moons) and period.
    #[derive(Clone, Copy, Debug)]
    pub struct CircularOrbit {
        pub radius: f64,
        pub period_days: f64,
        pub parent: Option<BodyId>,
    }

    /// Provider where every body starts on the +x axis at J2000 and moves
    /// counter-clockwise in the ecliptic plane.
    #[derive(Clone, Debug, Default)]
    pub struct CircularEphemeris {
        orbits: HashMap<BodyId, CircularOrbit>,
    }

    impl CircularEphemeris {
        pub fn with(mut self, id: BodyId, orbit: CircularOrbit) -> Self {
            self.orbits.insert(id, orbit);
            self
        }

        /// Earth at 1 AU and the Moon at 384,400 km.
        pub fn earth_moon() -> Self {
            Self::default()
                .with(
                    BodyId::Earth,
                    CircularOrbit {
                        radius: 1.0,
                        period_days: 365.25,
                        parent: None,
                    },
                )
                .with(
                    BodyId::Moon,
                    CircularOrbit {
                        radius: 384_400.0,
                        period_days: 27.32,
                        parent: Some(BodyId::Earth),
                    },
                )
        }

        fn orbit(&self, body: BodyId) -> Result<Option<&CircularOrbit>, EphemerisError> {
            if body == BodyId::Sun {
                return Ok(None);
            }
            self.orbits
                .get(&body)
                .map(Some)
                .ok_or(EphemerisError::UnknownBody(body))
        }

        fn local(orbit: &CircularOrbit, instant: SimInstant) -> DVec3 {
            let angle = TAU * instant.days_since_j2000() / orbit.period_days;
            DVec3::new(angle.cos(), angle.sin(), 0.0) * orbit.radius
        }
    }

    impl EphemerisProvider for CircularEphemeris {
        fn heliocentric_position(
            &self,
            body: BodyId,
            instant: SimInstant,
        ) -> Result<DVec3, EphemerisError> {
            let Some(orbit) = self.orbit(body)? else {
                return Ok(DVec3::ZERO);
            };
            let local = Self::local(orbit, instant);
            match orbit.parent {
                None => Ok(local),
                Some(parent) => Ok(self.heliocentric_position(parent, instant)? + local / AU_KM),
            }
        }

        fn relative_position(
            &self,
            body: BodyId,
            instant: SimInstant,
        ) -> Result<DVec3, EphemerisError> {
            let Some(orbit) = self.orbit(body)? else {
                return Ok(DVec3::ZERO);
            };
            let local = Self::local(orbit, instant);
            Ok(if orbit.parent.is_some() { local } else { local * AU_KM })
        }

        fn primary(&self, body: BodyId) -> Result<Option<BodyId>, EphemerisError> {
            Ok(self.orbit(body)?.and_then(|orbit| orbit.parent))
        }
    }

    fn body(id: BodyId, radius_km: f64, parent: Option<BodyId>, period: Option<f64>) -> Body {
        Body {
            id,
            name: id.name().to_string(),
            radius_km,
            color: [200, 200, 200],
            parent,
            orbital_period_days: period,
            rotation_period_hours: Some(24.0),
        }
    }

    /// Sun, Earth and Moon.
    pub fn earth_moon_registry() -> BodyRegistry {
        BodyRegistry::new(vec![
            body(BodyId::Sun, 695_700.0, None, None),
            body(BodyId::Earth, 6_371.0, None, Some(365.2564)),
            body(BodyId::Moon, 1_737.4, Some(BodyId::Earth), Some(27.32158)),
        ])
        .expect("fixture registry is valid")
    }
}
