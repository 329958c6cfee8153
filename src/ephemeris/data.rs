//! Orbital elements for the bodies the built-in ephemeris knows about.
//!
//! Planets: JPL "Keplerian Elements for Approximate Positions of the Major
//! Planets" (Standish), J2000 ecliptic, with linear rates per Julian century.
//! Moons: mean elements relative to their primary. The Moon carries its
//! node and perigee precession; the other moons are kept in the ecliptic
//! plane of their primary (inclination 0), which is plenty for display.

use std::fmt;

use serde::Deserialize;

use super::kepler::KeplerOrbit;

/// Identifier for celestial bodies in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    // Moons
    Moon,
    Phobos,
    Deimos,
    Io,
    Europa,
    Ganymede,
    Callisto,
    Titan,
}

impl BodyId {
    /// All planets (not including Sun or moons)
    pub const PLANETS: &'static [BodyId] = &[
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
    ];

    /// All moons
    pub const MOONS: &'static [BodyId] = &[
        BodyId::Moon,
        BodyId::Phobos,
        BodyId::Deimos,
        BodyId::Io,
        BodyId::Europa,
        BodyId::Ganymede,
        BodyId::Callisto,
        BodyId::Titan,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Earth => "Earth",
            BodyId::Mars => "Mars",
            BodyId::Jupiter => "Jupiter",
            BodyId::Saturn => "Saturn",
            BodyId::Uranus => "Uranus",
            BodyId::Neptune => "Neptune",
            BodyId::Moon => "Moon",
            BodyId::Phobos => "Phobos",
            BodyId::Deimos => "Deimos",
            BodyId::Io => "Io",
            BodyId::Europa => "Europa",
            BodyId::Ganymede => "Ganymede",
            BodyId::Callisto => "Callisto",
            BodyId::Titan => "Titan",
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which frame an orbit's positions are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitCenter {
    /// Heliocentric, semi-major axis in AU.
    Sun,
    /// Centred on the given primary, semi-major axis in km.
    Primary(BodyId),
}

/// Orbit of one body plus the frame it is expressed in.
#[derive(Clone, Debug)]
pub struct OrbitTrack {
    pub center: OrbitCenter,
    pub orbit: KeplerOrbit,
}

/// Elements for a body, or `None` for the Sun (fixed at the origin).
pub fn orbit_track(id: BodyId) -> Option<OrbitTrack> {
    use OrbitCenter::{Primary, Sun};

    let track = |center, orbit| Some(OrbitTrack { center, orbit });

    match id {
        BodyId::Sun => None,

        // Planets (heliocentric orbits)
        //                          a (AU)       e            I (deg)      L (deg)         ϖ (deg)        Ω (deg)
        BodyId::Mercury => track(
            Sun,
            KeplerOrbit::from_jpl(
                [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
                [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
            ),
        ),
        BodyId::Venus => track(
            Sun,
            KeplerOrbit::from_jpl(
                [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
                [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
            ),
        ),
        // Earth-Moon barycentre; the offset to Earth itself is ~4700 km.
        BodyId::Earth => track(
            Sun,
            KeplerOrbit::from_jpl(
                [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
                [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
            ),
        ),
        BodyId::Mars => track(
            Sun,
            KeplerOrbit::from_jpl(
                [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
                [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
            ),
        ),
        BodyId::Jupiter => track(
            Sun,
            KeplerOrbit::from_jpl(
                [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
                [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
            ),
        ),
        BodyId::Saturn => track(
            Sun,
            KeplerOrbit::from_jpl(
                [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
                [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
            ),
        ),
        BodyId::Uranus => track(
            Sun,
            KeplerOrbit::from_jpl(
                [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
                [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
            ),
        ),
        BodyId::Neptune => track(
            Sun,
            KeplerOrbit::from_jpl(
                [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
                [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.01262724],
            ),
        ),

        // Moons (parent-relative orbits, km)
        BodyId::Moon => track(
            Primary(BodyId::Earth),
            KeplerOrbit::from_mean_elements(MeanElements {
                semi_major_axis: 384_400.0,
                eccentricity: 0.0549,
                inclination_deg: 5.1454,
                node_deg: 125.0434,
                node_rate_deg_per_day: -0.052_953_808_3,
                arg_periapsis_deg: 318.3099,
                arg_periapsis_rate_deg_per_day: 0.164_357_322_3,
                mean_anomaly_deg: 134.9629,
                mean_motion_deg_per_day: 13.064_992_950_9,
            }),
        ),
        BodyId::Phobos => track(
            Primary(BodyId::Mars),
            KeplerOrbit::from_mean_elements(MeanElements::planar(9_376.0, 0.0151, 150.06, 91.05, 1128.84)),
        ),
        BodyId::Deimos => track(
            Primary(BodyId::Mars),
            KeplerOrbit::from_mean_elements(MeanElements::planar(23_460.0, 0.00033, 290.50, 325.00, 285.16)),
        ),
        BodyId::Io => track(
            Primary(BodyId::Jupiter),
            KeplerOrbit::from_mean_elements(MeanElements::planar(421_800.0, 0.0041, 84.13, 342.02, 203.49)),
        ),
        BodyId::Europa => track(
            Primary(BodyId::Jupiter),
            KeplerOrbit::from_mean_elements(MeanElements::planar(671_100.0, 0.0094, 88.97, 171.02, 101.37)),
        ),
        BodyId::Ganymede => track(
            Primary(BodyId::Jupiter),
            KeplerOrbit::from_mean_elements(MeanElements::planar(1_070_400.0, 0.0011, 192.42, 317.54, 50.32)),
        ),
        BodyId::Callisto => track(
            Primary(BodyId::Jupiter),
            KeplerOrbit::from_mean_elements(MeanElements::planar(1_882_700.0, 0.0074, 52.64, 181.41, 21.57)),
        ),
        BodyId::Titan => track(
            Primary(BodyId::Saturn),
            KeplerOrbit::from_mean_elements(MeanElements::planar(1_221_870.0, 0.0288, 180.53, 163.31, 22.58)),
        ),
    }
}

/// Classical mean elements at J2000 with linear apsidal/nodal precession.
#[derive(Clone, Copy, Debug)]
pub struct MeanElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub node_deg: f64,
    pub node_rate_deg_per_day: f64,
    pub arg_periapsis_deg: f64,
    pub arg_periapsis_rate_deg_per_day: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_deg_per_day: f64,
}

impl MeanElements {
    /// Non-precessing orbit in the reference plane.
    pub fn planar(
        semi_major_axis: f64,
        eccentricity: f64,
        arg_periapsis_deg: f64,
        mean_anomaly_deg: f64,
        mean_motion_deg_per_day: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination_deg: 0.0,
            node_deg: 0.0,
            node_rate_deg_per_day: 0.0,
            arg_periapsis_deg,
            arg_periapsis_rate_deg_per_day: 0.0,
            mean_anomaly_deg,
            mean_motion_deg_per_day,
        }
    }
}
