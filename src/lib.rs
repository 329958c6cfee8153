//! Orrery - time-scrubbable solar system model
//!
//! A library crate providing the simulation core (ephemeris, body catalog,
//! clock, orbit sampling, controller) and the Bevy plugins that present it.

pub mod bodies;
pub mod camera;
pub mod ephemeris;
pub mod error;
pub mod input;
pub mod orbit;
pub mod placement;
pub mod render;
pub mod scaling;
pub mod simulation;
pub mod time;
pub mod types;
pub mod ui;

pub use bodies::{Body, BodyRegistry, ConfigurationError};
pub use ephemeris::{BodyId, EphemerisError, EphemerisProvider, KeplerEphemeris};
pub use error::SimulationError;
pub use simulation::{
    BodySnapshot, DisplayConfig, SimulationCommand, SimulationController, SimulationPlugin,
    SimulationSettings,
};
pub use types::SimInstant;

#[cfg(test)]
pub mod test_utils;
