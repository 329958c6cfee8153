//! Body meshes, spawned once and moved every frame from controller snapshots.

use bevy::prelude::*;

use crate::ephemeris::BodyId;
use crate::simulation::SimulationController;

/// Component marking an entity as the visual for a catalog body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyVisual {
    pub id: BodyId,
}

/// Plugin providing celestial body spawning functionality.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies);
    }
}

/// Spawn a unit sphere per body. Size comes from the transform scale so
/// changing the minimum display size needs no new meshes.
fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<SimulationController>,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));

    for body in sim.bodies() {
        let [r, g, b] = body.color;
        let color = Color::srgb_u8(r, g, b);

        // Sun is emissive (glows) and ignores lighting
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: if body.id == BodyId::Sun {
                color.to_linear() * 4.0
            } else {
                LinearRgba::BLACK
            },
            unlit: body.id == BodyId::Sun,
            ..default()
        });

        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            body_transform(body.position, body.visual_radius, body.rotation_phase),
            BodyVisual { id: body.id },
            Name::new(body.name.to_string()),
        ));
    }

    info!("Spawned {} bodies", sim.registry().len());
}

fn body_transform(position: Vec3, visual_radius: f32, rotation_phase: f32) -> Transform {
    Transform::from_translation(position)
        .with_rotation(Quat::from_rotation_y(rotation_phase))
        .with_scale(Vec3::splat(visual_radius))
}

/// Copy position, size and spin from the controller.
pub fn sync_body_transforms(
    sim: Res<SimulationController>,
    mut query: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in query.iter_mut() {
        let Some(body) = sim.body(visual.id) else {
            continue;
        };
        *transform = body_transform(body.position, body.visual_radius, body.rotation_phase);
    }
}
