//! Rendering systems for the orrery.
//!
//! Renderers only read [`SimulationController`](crate::simulation::SimulationController)
//! snapshots; they never change simulation state.

mod background;
pub mod bodies;
mod labels;
mod orbits;

use bevy::prelude::*;

use crate::simulation::SimulationSet;

use self::background::BackgroundPlugin;
use self::bodies::{CelestialBodyPlugin, sync_body_transforms};
use self::labels::LabelPlugin;
use self::orbits::{OrbitPathPlugin, draw_orbit_paths};

pub use self::background::{StarfieldSettings, constellation_segments, fibonacci_sphere};
pub use self::bodies::BodyVisual;
pub use self::labels::LabelSettings;
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, BackgroundPlugin, OrbitPathPlugin, LabelPlugin))
            // Bodies first so orbit paths are drawn around this frame's parents
            .add_systems(
                Update,
                (sync_body_transforms, draw_orbit_paths)
                    .chain()
                    .after(SimulationSet::Tick),
            );
    }
}
