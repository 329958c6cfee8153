//! Errors surfaced by the simulation controller.

use crate::bodies::ConfigurationError;
use crate::ephemeris::EphemerisError;

#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("elapsed time must be finite, got {0}")]
    NonFiniteElapsed(f64),
}
