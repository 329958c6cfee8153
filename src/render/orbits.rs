//! Orbit path rendering using Bevy Gizmos.
//!
//! Paths come pre-sampled from the controller. Moon paths are stored
//! relative to their parent and are translated to its current position
//! every frame, so they travel with the planet.

use bevy::prelude::*;

use crate::simulation::SimulationController;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>();
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Alpha value for orbit path color.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            alpha: 0.35,
        }
    }
}

/// Draw every sampled orbit as a closed line strip in the body's colour.
pub fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    sim: Res<SimulationController>,
) {
    if !settings.visible {
        return;
    }

    for body in sim.bodies() {
        if body.orbit.is_none() {
            continue;
        }
        let [r, g, b] = body.color;
        let alpha = (settings.alpha.clamp(0.0, 1.0) * 255.0) as u8;
        let color = Color::srgba_u8(r, g, b, alpha);
        gizmos.linestrip(body.orbit_points(), color);
    }
}
