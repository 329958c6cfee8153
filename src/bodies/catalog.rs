//! TOML body catalog.
//!
//! ```toml
//! [[body]]
//! id = "Moon"
//! name = "Moon"
//! radius_km = 1737.4
//! color = "#888888"
//! parent = "Earth"
//! orbital_period_days = 27.32158
//! rotation_period_hours = 655.72
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::{Body, BodyRegistry, ConfigurationError};
use crate::ephemeris::BodyId;

/// Built-in catalog, embedded at compile time.
pub const BUILTIN_CATALOG: &str = include_str!("../../assets/bodies.toml");

/// Environment variable naming a catalog file that replaces the built-in one.
pub const CATALOG_ENV_VAR: &str = "ORRERY_CATALOG";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(rename = "body", default)]
    bodies: Vec<BodyRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BodyRecord {
    id: BodyId,
    name: String,
    radius_km: f64,
    color: String,
    #[serde(default)]
    parent: Option<BodyId>,
    #[serde(default)]
    orbital_period_days: Option<f64>,
    #[serde(default)]
    rotation_period_hours: Option<f64>,
}

impl BodyRecord {
    fn into_body(self) -> Result<Body, ConfigurationError> {
        let color = parse_hex_color(&self.color).ok_or_else(|| ConfigurationError::InvalidColor {
            body: self.id,
            value: self.color.clone(),
        })?;
        Ok(Body {
            id: self.id,
            name: self.name,
            radius_km: self.radius_km,
            color,
            parent: self.parent,
            orbital_period_days: self.orbital_period_days,
            rotation_period_hours: self.rotation_period_hours,
        })
    }
}

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

impl BodyRegistry {
    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let file: CatalogFile = toml::from_str(text)?;
        let bodies = file
            .bodies
            .into_iter()
            .map(BodyRecord::into_body)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(bodies)
    }

    /// Read, parse and validate a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The embedded default catalog.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }
}

/// Load the catalog named by [`CATALOG_ENV_VAR`], or the built-in one.
pub fn load_catalog() -> Result<BodyRegistry, ConfigurationError> {
    match std::env::var_os(CATALOG_ENV_VAR) {
        Some(path) => {
            info!("Loading body catalog from {}", Path::new(&path).display());
            BodyRegistry::from_path(path)
        }
        None => BodyRegistry::builtin(),
    }
}
