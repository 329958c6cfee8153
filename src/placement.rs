//! Where a body sits in display space at an instant.

use bevy::math::Vec3;

use crate::bodies::Body;
use crate::ephemeris::{EphemerisError, EphemerisProvider};
use crate::scaling::{heliocentric_to_display, relative_to_display};
use crate::types::SimInstant;

/// Display-space location of one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Heliocentric display position.
    Absolute(Vec3),
    /// Display offset from the parent's position.
    Offset(Vec3),
}

impl Placement {
    /// Final display position given the parent's position (ignored for
    /// absolute placements).
    pub fn resolve(self, parent_position: Vec3) -> Vec3 {
        match self {
            Placement::Absolute(position) => position,
            Placement::Offset(offset) => parent_position + offset,
        }
    }
}

/// Locate `body` at `instant`: moons relative to their parent, everything
/// else heliocentrically.
pub fn locate(
    body: &Body,
    provider: &dyn EphemerisProvider,
    instant: SimInstant,
) -> Result<Placement, EphemerisError> {
    if body.parent.is_some() {
        let km = provider.relative_position(body.id, instant)?;
        Ok(Placement::Offset(relative_to_display(km)))
    } else {
        let au = provider.heliocentric_position(body.id, instant)?;
        Ok(Placement::Absolute(heliocentric_to_display(au)))
    }
}
