//! Property-based tests for ephemeris computations using proptest.
//!
//! These tests verify that orbital computations maintain expected properties
//! across a wide range of inputs.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::data::{BodyId, MeanElements};
use super::kepler::{KeplerOrbit, solve_eccentric_anomaly};
use super::{EphemerisProvider, KeplerEphemeris};
use crate::types::{AU_KM, SimInstant};

fn any_body() -> impl Strategy<Value = BodyId> {
    let all: Vec<BodyId> = BodyId::PLANETS.iter().chain(BodyId::MOONS).copied().collect();
    prop::sample::select(all)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The solver should always converge and produce E such that M = E - e*sin(E).
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.95,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;
        let e_anom = solve_eccentric_anomaly(mean_anomaly, eccentricity);

        let m_check = e_anom - eccentricity * e_anom.sin();
        let error = (m_check - mean_anomaly.rem_euclid(TAU)).abs();
        prop_assert!(
            error < 1e-8,
            "Kepler solver failed: M={}, e={}, E={}, M_check={}, error={}",
            mean_anomaly, eccentricity, e_anom, m_check, error
        );
    }

    /// Orbital radius stays between periapsis and apoapsis.
    #[test]
    fn prop_radius_within_apsides(
        semi_major_axis in 1_000.0f64..2_000_000.0,
        eccentricity in 0.0f64..0.5,
        days in -10_000.0f64..10_000.0,
    ) {
        let orbit = KeplerOrbit::from_mean_elements(
            MeanElements::planar(semi_major_axis, eccentricity, 30.0, 0.0, 10.0),
        );
        let r = orbit.position(days).length();
        let tolerance = semi_major_axis * 1e-9;
        prop_assert!(r >= semi_major_axis * (1.0 - eccentricity) - tolerance);
        prop_assert!(r <= semi_major_axis * (1.0 + eccentricity) + tolerance);
    }

    /// Position should change smoothly over time with no sudden jumps.
    #[test]
    fn prop_position_continuity(
        body in any_body(),
        start_days in -36_525.0f64..36_525.0,
    ) {
        let eph = KeplerEphemeris::new();
        let t = SimInstant::J2000.plus_days(start_days);
        let dt_days = 1.0 / 24.0;

        let p1 = eph.relative_position(body, t).unwrap();
        let p2 = eph.relative_position(body, t.plus_days(dt_days)).unwrap();
        let p3 = eph.relative_position(body, t.plus_days(2.0 * dt_days)).unwrap();

        let v12 = (p2 - p1).length();
        let v23 = (p3 - p2).length();
        let v_change = (v23 - v12).abs() / (v12 + 1.0);
        prop_assert!(
            v_change < 0.1,
            "Velocity discontinuity for {}: v12={}, v23={}",
            body, v12, v23
        );
    }

    /// Queries are pure: the same inputs always give the same answer.
    #[test]
    fn prop_queries_are_deterministic(
        body in any_body(),
        days in -100_000.0f64..100_000.0,
    ) {
        let eph = KeplerEphemeris::new();
        let t = SimInstant::J2000.plus_days(days);
        prop_assert_eq!(
            eph.heliocentric_position(body, t),
            eph.heliocentric_position(body, t)
        );
    }

    /// A moon's heliocentric position is its primary's plus the relative offset.
    #[test]
    fn prop_moon_helio_is_parent_plus_offset(
        index in 0usize..8,
        days in -36_525.0f64..36_525.0,
    ) {
        let eph = KeplerEphemeris::new();
        let moon = BodyId::MOONS[index];
        let t = SimInstant::J2000.plus_days(days);

        let parent = eph.primary(moon).unwrap().unwrap();
        let parent_pos = eph.heliocentric_position(parent, t).unwrap();
        let moon_pos = eph.heliocentric_position(moon, t).unwrap();
        let offset = eph.relative_position(moon, t).unwrap();

        let diff_km = ((moon_pos - parent_pos) * AU_KM - offset).length();
        prop_assert!(diff_km < 1.0, "{} offset mismatch of {} km", moon, diff_km);
    }
}
