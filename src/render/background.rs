//! Background rendering: starfield, constellation overlay and lighting.
//!
//! Stars sit on a large sphere around the Sun. Their layout is a Fibonacci
//! lattice, so the sky looks the same on every run.

use bevy::prelude::*;

use crate::simulation::{SimulationController, SimulationSet};

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarfieldSettings>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (spawn_starfield, spawn_lighting))
            .add_systems(Update, draw_constellations.after(SimulationSet::Tick));
    }
}

/// Starfield layout.
#[derive(Resource, Clone, Debug)]
pub struct StarfieldSettings {
    pub star_count: usize,
    /// Radius of the star sphere, in display units.
    pub radius: f32,
    /// Every n-th star anchors constellation lines.
    pub anchor_stride: usize,
    pub max_links_per_anchor: usize,
    /// Longest constellation line, as a fraction of the radius.
    pub max_link_fraction: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            star_count: 1500,
            radius: 20_000.0,
            anchor_stride: 50,
            max_links_per_anchor: 3,
            max_link_fraction: 0.25,
        }
    }
}

/// Line segments of the constellation overlay.
#[derive(Resource, Default)]
struct Constellations(Vec<(Vec3, Vec3)>);

/// `count` points spread evenly over a sphere.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
            let ring = (1.0 - y * y).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius
        })
        .collect()
}

/// Join nearby stars into short lines: each anchor star links to at most
/// `max_links` later stars closer than `max_distance`.
pub fn constellation_segments(
    stars: &[Vec3],
    anchor_stride: usize,
    max_links: usize,
    max_distance: f32,
) -> Vec<(Vec3, Vec3)> {
    let mut segments = Vec::new();
    for i in (0..stars.len()).step_by(anchor_stride.max(1)) {
        let start = stars[i];
        let mut links = 0;
        for end in stars[i + 1..].iter().step_by(10) {
            if links >= max_links {
                break;
            }
            if start.distance(*end) < max_distance {
                segments.push((start, *end));
                links += 1;
            }
        }
    }
    segments
}

/// Spawn the starfield and precompute the constellation lines.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<StarfieldSettings>,
) {
    // Mostly white, some yellowish and blueish
    let palette = [
        Color::WHITE,
        Color::srgb_u8(0xff, 0xdd, 0xaa),
        Color::srgb_u8(0xbb, 0xcc, 0xff),
    ]
    .map(|color| {
        materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            ..default()
        })
    });

    let star_mesh = meshes.add(Sphere::new(settings.radius * 0.0012));
    let stars = fibonacci_sphere(settings.star_count, settings.radius);

    for (i, position) in stars.iter().enumerate() {
        // Golden-ratio sequence picks a stable pseudo-random tint
        let tint = (i as f32 * 0.618_034).fract();
        let material = match tint {
            t if t > 0.9 => &palette[2],
            t if t > 0.7 => &palette[1],
            _ => &palette[0],
        };

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(*position),
        ));
    }

    let segments = constellation_segments(
        &stars,
        settings.anchor_stride,
        settings.max_links_per_anchor,
        settings.radius * settings.max_link_fraction,
    );
    info!(
        "Spawned {} background stars, {} constellation lines",
        stars.len(),
        segments.len()
    );
    commands.insert_resource(Constellations(segments));
}

fn draw_constellations(
    mut gizmos: Gizmos,
    sim: Res<SimulationController>,
    constellations: Option<Res<Constellations>>,
) {
    if !sim.display().overlay_visible {
        return;
    }
    let Some(constellations) = constellations else {
        return;
    };

    let color = Color::srgba(1.0, 1.0, 1.0, 0.2);
    for (start, end) in &constellations.0 {
        gizmos.line(*start, *end, color);
    }
}

/// The Sun is the only light source.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 5.0e9,
            range: 10_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));

    info!("Scene lighting initialized");
}
