//! Property-based tests for the simulation controller.

use proptest::prelude::*;

use super::{SimulationController, SimulationSettings};
use crate::bodies::BodyRegistry;
use crate::ephemeris::{BodyId, KeplerEphemeris};
use crate::test_utils::fixtures;
use crate::types::SimInstant;

fn controller(start_days: f64) -> SimulationController {
    SimulationController::new(
        fixtures::earth_moon_registry(),
        Box::new(KeplerEphemeris::new()),
        &SimulationSettings {
            start: SimInstant::J2000.plus_days(start_days),
            ..Default::default()
        },
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Running forward at +r then back at -r for the same frames returns
    /// to the starting instant and positions.
    #[test]
    fn prop_reversing_time_scale_returns_to_start(
        start_days in -20_000.0f64..20_000.0,
        rate in 0.01f64..50.0,
        frames in prop::collection::vec(0.001f64..0.1, 1..40),
    ) {
        let mut sim = controller(start_days);
        let start = sim.current_instant();
        let earth_start = sim.body(BodyId::Earth).unwrap().position;

        sim.set_time_scale(rate).unwrap();
        for dt in &frames {
            sim.tick(*dt).unwrap();
        }
        sim.set_time_scale(-rate).unwrap();
        for dt in &frames {
            sim.tick(*dt).unwrap();
        }

        let drift = (sim.current_instant().j2000_seconds() - start.j2000_seconds()).abs();
        prop_assert!(drift < 1e-3, "clock drifted {} s", drift);

        let earth_end = sim.body(BodyId::Earth).unwrap().position;
        prop_assert!(earth_start.distance(earth_end) < 1e-3);
    }

    /// Every visual radius honours the configured minimum.
    #[test]
    fn prop_min_size_is_a_floor(min_size in 0.001f32..5.0, elapsed in 0.0f64..3.0) {
        let mut sim = SimulationController::new(
            BodyRegistry::builtin().unwrap(),
            Box::new(KeplerEphemeris::new()),
            &SimulationSettings {
                start: SimInstant::J2000,
                ..Default::default()
            },
        )
        .unwrap();
        sim.set_min_size(min_size).unwrap();
        sim.tick(elapsed).unwrap();
        for body in sim.bodies() {
            prop_assert!(body.visual_radius >= min_size, "{} below floor", body.id);
        }
    }

    /// Rotation phases stay in [0, 2π).
    #[test]
    fn prop_rotation_phase_in_range(start_days in -100_000.0f64..100_000.0) {
        let sim = controller(start_days);
        for body in sim.bodies() {
            prop_assert!((0.0..std::f32::consts::TAU).contains(&body.rotation_phase));
        }
    }
}
