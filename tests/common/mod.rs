//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::Vec3;
use orrery::{
    BodyId, BodyRegistry, KeplerEphemeris, SimInstant, SimulationController, SimulationSettings,
};

/// Parse an RFC 3339 timestamp.
pub fn at(text: &str) -> SimInstant {
    SimInstant::parse_rfc3339(text).expect("valid timestamp")
}

/// Controller over the built-in catalog and ephemeris, 1 day per second.
pub fn builtin_controller(start: SimInstant) -> SimulationController {
    SimulationController::new(
        BodyRegistry::builtin().expect("built-in catalog is valid"),
        Box::new(KeplerEphemeris::new()),
        &SimulationSettings {
            start,
            ..Default::default()
        },
    )
    .expect("controller builds")
}

pub fn position(sim: &SimulationController, id: BodyId) -> Vec3 {
    sim.body(id).expect("body is in catalog").position
}

/// Angle swept about the origin between two display positions, in degrees.
pub fn degrees_about_sun(before: Vec3, after: Vec3) -> f64 {
    before.as_dvec3().angle_between(after.as_dvec3()).to_degrees()
}
