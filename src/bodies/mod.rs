//! Static body catalog: identity, physical size, colour and periods.
//!
//! The registry is ordered so that every parent precedes its moons, which
//! lets the controller update bodies in a single pass.

pub mod catalog;

pub use catalog::{BUILTIN_CATALOG, CATALOG_ENV_VAR, load_catalog, parse_hex_color};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ephemeris::BodyId;

/// Errors detected while building the catalog or configuring the simulation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("catalog contains no bodies")]
    EmptyCatalog,
    #[error("{0} is listed more than once")]
    DuplicateBody(BodyId),
    #[error("{body} names parent {parent}, which is not listed before it")]
    MissingParent { body: BodyId, parent: BodyId },
    #[error("{body} orbits {parent}, which itself has a parent")]
    NestedParent { body: BodyId, parent: BodyId },
    #[error("{body}: catalog parent {catalog:?} does not match ephemeris primary {ephemeris:?}")]
    ParentMismatch {
        body: BodyId,
        catalog: Option<BodyId>,
        ephemeris: Option<BodyId>,
    },
    #[error("ephemeris provider has no data for {0}")]
    UnknownBody(BodyId),
    #[error("{0} has no orbital period")]
    MissingPeriod(BodyId),
    #[error("{body} has non-positive orbital period {days} days")]
    InvalidPeriod { body: BodyId, days: f64 },
    #[error("{body} has zero or non-finite rotation period {hours} hours")]
    InvalidRotationPeriod { body: BodyId, hours: f64 },
    #[error("{body} has non-positive radius {radius_km} km")]
    InvalidRadius { body: BodyId, radius_km: f64 },
    #[error("{body} has invalid colour {value:?}, expected #rrggbb")]
    InvalidColor { body: BodyId, value: String },
    #[error("minimum display size must be finite and positive, got {0}")]
    InvalidMinSize(f64),
    #[error("time scale must be finite, got {0}")]
    InvalidTimeScale(f64),
    #[error("orbit sample count must be at least 1")]
    ZeroSampleCount,
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub radius_km: f64,
    /// sRGB
    pub color: [u8; 3],
    /// Body this one orbits, by id. Parents hold no link back to their moons.
    pub parent: Option<BodyId>,
    /// Sidereal orbital period. Required for everything but the Sun.
    pub orbital_period_days: Option<f64>,
    pub rotation_period_hours: Option<f64>,
}

/// Validated, ordered set of bodies.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    index: HashMap<BodyId, usize>,
}

impl BodyRegistry {
    /// Validate and index `bodies`, keeping their order.
    pub fn new(bodies: Vec<Body>) -> Result<Self, ConfigurationError> {
        if bodies.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            validate_body(body)?;

            if let Some(parent) = body.parent {
                let Some(&parent_index) = index.get(&parent) else {
                    return Err(ConfigurationError::MissingParent {
                        body: body.id,
                        parent,
                    });
                };
                let parent_body: &Body = &bodies[parent_index];
                if parent_body.parent.is_some() {
                    return Err(ConfigurationError::NestedParent {
                        body: body.id,
                        parent,
                    });
                }
            }

            if index.insert(body.id, i).is_some() {
                return Err(ConfigurationError::DuplicateBody(body.id));
            }
        }

        Ok(Self { bodies, index })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in update order (parents first).
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Index of the parent of the body at `index`, always lower than `index`.
    pub fn parent_index(&self, index: usize) -> Option<usize> {
        self.bodies
            .get(index)
            .and_then(|body| body.parent)
            .and_then(|parent| self.index_of(parent))
    }
}

fn validate_body(body: &Body) -> Result<(), ConfigurationError> {
    if !(body.radius_km.is_finite() && body.radius_km > 0.0) {
        return Err(ConfigurationError::InvalidRadius {
            body: body.id,
            radius_km: body.radius_km,
        });
    }

    match body.orbital_period_days {
        Some(days) if !(days.is_finite() && days > 0.0) => {
            return Err(ConfigurationError::InvalidPeriod { body: body.id, days });
        }
        None if body.id != BodyId::Sun => {
            return Err(ConfigurationError::MissingPeriod(body.id));
        }
        _ => {}
    }

    if let Some(hours) = body.rotation_period_hours
        && !(hours.is_finite() && hours != 0.0)
    {
        return Err(ConfigurationError::InvalidRotationPeriod { body: body.id, hours });
    }

    Ok(())
}
