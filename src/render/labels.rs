//! Body labels using egui for text rendering.
//!
//! Renders planet and moon names near each celestial body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::{CameraState, MainCamera};
use crate::simulation::SimulationController;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .add_systems(EguiPrimaryContextPass, draw_body_labels);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Hide moon labels when the camera is further than this from its focus.
    pub max_distance_for_moons: f32,
    /// Offset from body center in screen pixels.
    pub offset: f32,
    pub font_size: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            max_distance_for_moons: 40.0,
            offset: 12.0,
            font_size: 14.0,
        }
    }
}

/// Draw labels for all celestial bodies.
fn draw_body_labels(
    mut contexts: EguiContexts,
    sim: Res<SimulationController>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    camera_state: Res<CameraState>,
    settings: Res<LabelSettings>,
) {
    if !sim.display().labels_visible {
        return;
    }

    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let show_moons = camera_state.distance <= settings.max_distance_for_moons;
    let painter = ctx.layer_painter(egui::LayerId::background());
    let font = egui::FontId::proportional(settings.font_size);

    for body in sim.bodies() {
        if body.parent_anchor.is_some() && !show_moons {
            continue;
        }

        // Project world position to screen
        let Ok(screen_pos) = camera.world_to_viewport(camera_transform, body.position) else {
            continue;
        };

        let label_pos = egui::pos2(screen_pos.x + settings.offset, screen_pos.y + settings.offset);

        // Shadow
        painter.text(
            label_pos + egui::vec2(1.0, 1.0),
            egui::Align2::LEFT_TOP,
            body.name,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        );

        painter.text(
            label_pos,
            egui::Align2::LEFT_TOP,
            body.name,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
        );
    }
}
