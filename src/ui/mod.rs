//! UI module providing the egui control panel.

mod control_panel;
pub mod icons;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use control_panel::MIN_SIZE_RANGE;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                control_panel::control_panel_system
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
