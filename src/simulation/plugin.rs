//! Bevy wiring for the controller: commands first, then one tick per frame.

use bevy::prelude::*;

use super::SimulationController;
use crate::error::SimulationError;
use crate::types::SimInstant;

/// Ordering of simulation systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Apply queued [`SimulationCommand`]s.
    Commands,
    /// Advance the clock and body states.
    Tick,
}

/// Requests from UI and input. The only way they change simulation state.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum SimulationCommand {
    SetTimeScale(f64),
    SetMinSize(f32),
    SetLabelsVisible(bool),
    SetOverlayVisible(bool),
    TogglePause,
    Reset,
    ResampleOrbits,
    JumpTo(SimInstant),
}

/// Plugin driving the [`SimulationController`] resource.
///
/// The controller itself is inserted by the caller, since building it can fail.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SimulationCommand>()
            .configure_sets(
                Update,
                (SimulationSet::Commands, SimulationSet::Tick).chain(),
            )
            .add_systems(
                Update,
                (
                    apply_simulation_commands.in_set(SimulationSet::Commands),
                    advance_simulation.in_set(SimulationSet::Tick),
                ),
            );
    }
}

/// Apply every pending command to the controller.
pub fn apply_simulation_commands(
    mut commands: MessageReader<SimulationCommand>,
    mut sim: ResMut<SimulationController>,
) {
    for command in commands.read() {
        let result: Result<(), SimulationError> = match *command {
            SimulationCommand::SetTimeScale(rate) => sim.set_time_scale(rate).map_err(Into::into),
            SimulationCommand::SetMinSize(size) => sim.set_min_size(size).map_err(Into::into),
            SimulationCommand::SetLabelsVisible(visible) => {
                sim.set_labels_visible(visible);
                Ok(())
            }
            SimulationCommand::SetOverlayVisible(visible) => {
                sim.set_overlay_visible(visible);
                Ok(())
            }
            SimulationCommand::TogglePause => {
                sim.toggle_pause();
                info!("Simulation {}", if sim.is_paused() { "paused" } else { "running" });
                Ok(())
            }
            SimulationCommand::Reset => sim.reset(),
            SimulationCommand::ResampleOrbits => sim.resample_orbits(),
            SimulationCommand::JumpTo(instant) => sim.jump_to(instant),
        };

        if let Err(err) = result {
            warn!("Rejected {:?}: {}", command, err);
        }
    }
}

/// Advance the simulation by the real time elapsed since the last frame.
///
/// A failed tick leaves the state at the last good instant and pauses.
pub fn advance_simulation(time: Res<Time>, mut sim: ResMut<SimulationController>) {
    if let Err(err) = sim.tick(time.delta_secs_f64()) {
        error!("Simulation halted at {}: {}", sim.current_instant(), err);
        sim.pause();
    }
}
