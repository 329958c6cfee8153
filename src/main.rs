//! Orrery - time-scrubbable solar system model
//!
//! Desktop application showing the planets and major moons at any date,
//! with a signed, adjustable time scale.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::bodies::load_catalog;
use orrery::camera::CameraPlugin;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::ui::UiPlugin;
use orrery::{
    KeplerEphemeris, SimulationController, SimulationError, SimulationPlugin, SimulationSettings,
};

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".into(),
            ..default()
        }),
        ..default()
    }));

    let settings = SimulationSettings::default();
    let controller = load_catalog().map_err(SimulationError::from).and_then(|registry| {
        SimulationController::new(registry, Box::new(KeplerEphemeris::new()), &settings)
    });
    let controller = match controller {
        Ok(controller) => controller,
        Err(err) => {
            error!("Failed to set up the simulation: {err}");
            return AppExit::error();
        }
    };
    info!("Simulation starts at {}", controller.current_instant());

    app.add_plugins(EguiPlugin::default())
        // Insert the controller before plugins that depend on it
        .insert_resource(controller)
        .add_plugins((SimulationPlugin, InputPlugin, CameraPlugin, RenderPlugin, UiPlugin))
        .run()
}
