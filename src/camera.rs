//! Orbit camera for viewing the solar system.
//!
//! The camera circles a focus point. Arrow keys and right-button drag
//! orbit it, the scroll wheel and +/- zoom.

use bevy::prelude::*;

use crate::input::{InputState, KEY_ORBIT_SPEED};

/// Closest the camera may get to its focus, in display units.
pub const MIN_DISTANCE: f32 = 1.0;

/// Furthest the camera may get; a little beyond Neptune's orbit.
pub const MAX_DISTANCE: f32 = 12_000.0;

/// Starting distance, showing the inner solar system.
pub const DEFAULT_DISTANCE: f32 = 400.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Keeps the camera off the poles, where yaw is undefined.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera state.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CameraState {
    pub focus: Vec3,
    /// Rotation about the display y axis.
    pub yaw: f32,
    /// Elevation above the ecliptic plane.
    pub pitch: f32,
    pub distance: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.6,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl CameraState {
    /// Apply one frame of orbit and zoom input.
    pub fn apply(&mut self, input: &InputState, delta_secs: f32) {
        let orbit = input.orbit_keys * KEY_ORBIT_SPEED * delta_secs + input.orbit_drag;
        self.yaw = (self.yaw + orbit.x).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + orbit.y).clamp(-MAX_PITCH, MAX_PITCH);

        if input.zoom != 0.0 {
            // Logarithmic zoom: each step scales distance by a fixed factor
            let factor = (1.0 - ZOOM_SPEED).powf(input.zoom);
            self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Camera transform looking at the focus.
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_camera);
    }
}

/// Spawn the main camera with a perspective projection deep enough for the
/// starfield.
fn setup_camera(mut commands: Commands, state: Res<CameraState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            near: 0.01,
            far: 100_000.0,
            ..default()
        }),
        state.transform(),
        MainCamera,
    ));
}

fn update_camera(
    time: Res<Time>,
    input: Res<InputState>,
    mut state: ResMut<CameraState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    state.apply(&input, time.delta_secs());

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = state.transform();
}
