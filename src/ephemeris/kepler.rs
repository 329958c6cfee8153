//! Kepler orbit solver using Newton's method for the Kepler equation.

use bevy::math::DVec3;

use super::data::MeanElements;
use crate::types::{DAYS_PER_JULIAN_CENTURY, DEG_TO_RAD};

/// Linear drift of each element, per day.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SecularRates {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub mean_longitude: f64,
    pub longitude_of_periapsis: f64,
    pub longitude_of_node: f64,
}

/// Keplerian orbital elements for computing positions analytically.
/// Angles in radians, time in days since J2000. The distance unit is
/// whatever the semi-major axis was given in (AU for planets, km for moons).
#[derive(Clone, Debug, PartialEq)]
pub struct KeplerOrbit {
    /// Semi-major axis
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1 for ellipse)
    pub eccentricity: f64,
    /// Inclination to the reference plane
    pub inclination: f64,
    /// Mean longitude at J2000 (L = M + ϖ)
    pub mean_longitude: f64,
    /// Longitude of periapsis (ϖ = ω + Ω)
    pub longitude_of_periapsis: f64,
    /// Longitude of the ascending node (Ω)
    pub longitude_of_node: f64,
    /// Per-day drift of the elements above
    pub rates: SecularRates,
}

impl KeplerOrbit {
    /// Build from a JPL approximate-elements row.
    ///
    /// `elements` is `[a, e, I, L, ϖ, Ω]` (AU and degrees) and `rates` the
    /// matching per-century rates.
    pub fn from_jpl(elements: [f64; 6], rates: [f64; 6]) -> Self {
        let per_day = |v: f64| v / DAYS_PER_JULIAN_CENTURY;
        Self {
            semi_major_axis: elements[0],
            eccentricity: elements[1],
            inclination: elements[2] * DEG_TO_RAD,
            mean_longitude: elements[3] * DEG_TO_RAD,
            longitude_of_periapsis: elements[4] * DEG_TO_RAD,
            longitude_of_node: elements[5] * DEG_TO_RAD,
            rates: SecularRates {
                semi_major_axis: per_day(rates[0]),
                eccentricity: per_day(rates[1]),
                inclination: per_day(rates[2]) * DEG_TO_RAD,
                mean_longitude: per_day(rates[3]) * DEG_TO_RAD,
                longitude_of_periapsis: per_day(rates[4]) * DEG_TO_RAD,
                longitude_of_node: per_day(rates[5]) * DEG_TO_RAD,
            },
        }
    }

    /// Build from classical mean elements (Ω, ω, M with per-day rates).
    pub fn from_mean_elements(m: MeanElements) -> Self {
        let periapsis_deg = m.node_deg + m.arg_periapsis_deg;
        let periapsis_rate = m.node_rate_deg_per_day + m.arg_periapsis_rate_deg_per_day;
        Self {
            semi_major_axis: m.semi_major_axis,
            eccentricity: m.eccentricity,
            inclination: m.inclination_deg * DEG_TO_RAD,
            mean_longitude: (periapsis_deg + m.mean_anomaly_deg) * DEG_TO_RAD,
            longitude_of_periapsis: periapsis_deg * DEG_TO_RAD,
            longitude_of_node: m.node_deg * DEG_TO_RAD,
            rates: SecularRates {
                semi_major_axis: 0.0,
                eccentricity: 0.0,
                inclination: 0.0,
                mean_longitude: (periapsis_rate + m.mean_motion_deg_per_day) * DEG_TO_RAD,
                longitude_of_periapsis: periapsis_rate * DEG_TO_RAD,
                longitude_of_node: m.node_rate_deg_per_day * DEG_TO_RAD,
            },
        }
    }

    /// Position at `days` since J2000, in the reference frame of the elements.
    pub fn position(&self, days: f64) -> DVec3 {
        let r = &self.rates;
        let a = self.semi_major_axis + r.semi_major_axis * days;
        let e = (self.eccentricity + r.eccentricity * days).clamp(0.0, 0.99);
        let i = self.inclination + r.inclination * days;
        let l = self.mean_longitude + r.mean_longitude * days;
        let w_bar = self.longitude_of_periapsis + r.longitude_of_periapsis * days;
        let node = self.longitude_of_node + r.longitude_of_node * days;

        let omega = w_bar - node;
        let e_anomaly = solve_eccentric_anomaly(l - w_bar, e);

        // Position in the orbital plane, x towards periapsis.
        let xp = a * (e_anomaly.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * e_anomaly.sin();

        let (sin_w, cos_w) = omega.sin_cos();
        let (sin_n, cos_n) = node.sin_cos();
        let (sin_i, cos_i) = i.sin_cos();

        DVec3::new(
            (cos_w * cos_n - sin_w * sin_n * cos_i) * xp
                + (-sin_w * cos_n - cos_w * sin_n * cos_i) * yp,
            (cos_w * sin_n + sin_w * cos_n * cos_i) * xp
                + (-sin_w * sin_n + cos_w * cos_n * cos_i) * yp,
            (sin_w * sin_i) * xp + (cos_w * sin_i) * yp,
        )
    }

    /// Period of the mean longitude, in days.
    pub fn period_days(&self) -> f64 {
        std::f64::consts::TAU / self.rates.mean_longitude
    }
}

/// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E
/// using Newton's method.
///
/// The mean anomaly is normalised to [0, 2π) first. Converges for the
/// eccentricities in the built-in tables (all below 0.21).
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(std::f64::consts::TAU);

    // Initial guess: E = M for low eccentricity, π for high e
    let mut e_anomaly = if eccentricity < 0.8 {
        m
    } else {
        std::f64::consts::PI
    };

    for _ in 0..50 {
        let (sin_e, cos_e) = e_anomaly.sin_cos();

        // f(E) = E - e*sin(E) - M
        let f = e_anomaly - eccentricity * sin_e - m;
        // f'(E) = 1 - e*cos(E)
        let f_prime = 1.0 - eccentricity * cos_e;

        let delta = f / f_prime;
        e_anomaly -= delta;

        if delta.abs() < 1e-12 {
            break;
        }
    }

    e_anomaly
}
