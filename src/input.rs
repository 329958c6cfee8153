//! Input detection and keyboard shortcuts.
//!
//! Raw keyboard and mouse state is collected once per frame into
//! [`InputState`]. Separate systems consume it: one turns shortcuts into
//! [`SimulationCommand`]s, the camera reads the orbit and zoom axes.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::simulation::{DisplayConfig, SimulationCommand, SimulationController, SimulationSet};

/// Fastest time scale reachable from the keyboard, in days per second.
pub const MAX_TIME_SCALE: f64 = 365.0;

/// Slowest non-zero time scale reachable from the keyboard.
pub const MIN_TIME_SCALE: f64 = 1.0 / 64.0;

/// Keys held for camera orbiting, in radians per second.
pub const KEY_ORBIT_SPEED: f32 = 1.2;

/// Radians per pixel of right-button drag.
pub const DRAG_ORBIT_SPEED: f32 = 0.005;

/// Per-frame input, reset and refilled every frame.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct InputState {
    pub toggle_pause: bool,
    pub reset: bool,
    pub faster: bool,
    pub slower: bool,
    pub reverse: bool,
    pub toggle_labels: bool,
    pub toggle_overlay: bool,
    pub resample: bool,
    /// Orbit rate from held keys (x = yaw, y = pitch), in -1..=1 per axis.
    pub orbit_keys: Vec2,
    /// Orbit angle from mouse drag this frame, in radians.
    pub orbit_drag: Vec2,
    /// Zoom steps this frame; positive zooms in.
    pub zoom: f32,
}

impl InputState {
    /// Shortcut and held-key state from the keyboard.
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let axis = |neg: KeyCode, pos: KeyCode| {
            (keys.pressed(pos) as i8 - keys.pressed(neg) as i8) as f32
        };

        let mut zoom = 0.0;
        if keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd) {
            zoom += 0.1;
        }
        if keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract) {
            zoom -= 0.1;
        }

        Self {
            toggle_pause: keys.just_pressed(KeyCode::Space),
            reset: keys.just_pressed(KeyCode::KeyR),
            faster: keys.just_pressed(KeyCode::BracketRight),
            slower: keys.just_pressed(KeyCode::BracketLeft),
            reverse: keys.just_pressed(KeyCode::Backspace),
            toggle_labels: keys.just_pressed(KeyCode::KeyL),
            toggle_overlay: keys.just_pressed(KeyCode::KeyC),
            resample: keys.just_pressed(KeyCode::KeyO),
            orbit_keys: Vec2::new(
                axis(KeyCode::ArrowLeft, KeyCode::ArrowRight),
                axis(KeyCode::ArrowDown, KeyCode::ArrowUp),
            ),
            orbit_drag: Vec2::ZERO,
            zoom,
        }
    }
}

/// Commands implied by this frame's shortcuts.
pub fn commands_for(
    input: &InputState,
    time_scale: f64,
    display: &DisplayConfig,
) -> Vec<SimulationCommand> {
    let mut commands = Vec::new();

    if input.toggle_pause {
        commands.push(SimulationCommand::TogglePause);
    }
    if input.faster {
        let next = if time_scale == 0.0 { 1.0 } else { time_scale * 2.0 };
        commands.push(SimulationCommand::SetTimeScale(clamp_time_scale(next)));
    }
    if input.slower && time_scale != 0.0 {
        commands.push(SimulationCommand::SetTimeScale(clamp_time_scale(time_scale * 0.5)));
    }
    if input.reverse && time_scale != 0.0 {
        commands.push(SimulationCommand::SetTimeScale(-time_scale));
    }
    if input.toggle_labels {
        commands.push(SimulationCommand::SetLabelsVisible(!display.labels_visible));
    }
    if input.toggle_overlay {
        commands.push(SimulationCommand::SetOverlayVisible(!display.overlay_visible));
    }
    if input.resample {
        commands.push(SimulationCommand::ResampleOrbits);
    }
    if input.reset {
        commands.push(SimulationCommand::Reset);
    }

    commands
}

/// Keep the magnitude within the keyboard range, preserving direction.
fn clamp_time_scale(rate: f64) -> f64 {
    rate.signum() * rate.abs().clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
}

/// Plugin providing input detection and keyboard shortcuts.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>().add_systems(
            Update,
            (detect_input, send_input_commands)
                .chain()
                .before(SimulationSet::Commands),
        );
    }
}

/// Fill [`InputState`] for this frame. Input egui is using is ignored.
fn detect_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut input: ResMut<InputState>,
) {
    let (egui_keyboard, egui_pointer) = contexts
        .ctx_mut()
        .map(|ctx| (ctx.wants_keyboard_input(), ctx.wants_pointer_input()))
        .unwrap_or((false, false));

    *input = if egui_keyboard {
        InputState::default()
    } else {
        InputState::from_keys(&keys)
    };

    if !egui_pointer {
        input.zoom += mouse_scroll.delta.y;
        if mouse_buttons.pressed(MouseButton::Right) {
            input.orbit_drag = -mouse_motion.delta * DRAG_ORBIT_SPEED;
        }
    }
}

fn send_input_commands(
    input: Res<InputState>,
    sim: Res<SimulationController>,
    mut commands: MessageWriter<SimulationCommand>,
) {
    for command in commands_for(&input, sim.time_scale(), sim.display()) {
        debug!("Input: {:?}", command);
        commands.write(command);
    }
}
