//! Simulation controller: clock, per-body state and orbit paths.
//!
//! Each tick advances the clock, places every body (parents before moons),
//! applies the minimum display size and recomputes rotation phases. Orbit
//! paths are only resampled on request.

mod plugin;
#[cfg(test)]
mod proptest_simulation;

pub use plugin::{SimulationCommand, SimulationPlugin, SimulationSet};

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::bodies::{Body, BodyRegistry, ConfigurationError};
use crate::ephemeris::{BodyId, EphemerisError, EphemerisProvider};
use crate::error::SimulationError;
use crate::orbit::{DEFAULT_ORBIT_SAMPLES, OrbitPolyline, OrbitSampler};
use crate::placement::locate;
use crate::scaling::visual_radius;
use crate::time::{SimulationClock, rotation_phase};
use crate::types::SimInstant;

/// Display options changed from the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Smallest rendered radius, in display units.
    pub min_size: f32,
    pub labels_visible: bool,
    /// Constellation overlay.
    pub overlay_visible: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_size: 0.5,
            labels_visible: true,
            overlay_visible: false,
        }
    }
}

/// Startup configuration for the controller.
#[derive(Clone, Debug)]
pub struct SimulationSettings {
    pub start: SimInstant,
    /// Sim-days per real second.
    pub time_scale: f64,
    pub orbit_samples: usize,
    pub display: DisplayConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            start: SimInstant::now(),
            time_scale: 1.0,
            orbit_samples: DEFAULT_ORBIT_SAMPLES,
            display: DisplayConfig::default(),
        }
    }
}

/// Mutable per-body record, one per catalog entry, in catalog order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    /// Offset from the parent, for moons.
    pub offset: Option<Vec3>,
    pub visual_radius: f32,
    /// Radians in `[0, 2π)`.
    pub rotation_phase: f64,
    pub orbit: Option<OrbitPolyline>,
}

/// Read-only view of one body for renderers.
#[derive(Clone, Copy, Debug)]
pub struct BodySnapshot<'a> {
    pub id: BodyId,
    pub name: &'a str,
    pub color: [u8; 3],
    pub position: Vec3,
    pub visual_radius: f32,
    pub rotation_phase: f32,
    pub orbit: Option<&'a OrbitPolyline>,
    /// Parent's current position; parent-relative orbit paths are drawn
    /// around it.
    pub parent_anchor: Option<Vec3>,
}

impl BodySnapshot<'_> {
    /// Orbit path points in display space.
    pub fn orbit_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let anchor = self.parent_anchor.unwrap_or(Vec3::ZERO);
        self.orbit.into_iter().flat_map(move |orbit| orbit.translated(anchor))
    }
}

/// Position and optional parent offset computed for one body.
type Placed = (Vec3, Option<Vec3>);

/// Owns the clock and every body's state.
#[derive(Resource)]
pub struct SimulationController {
    registry: BodyRegistry,
    provider: Box<dyn EphemerisProvider>,
    clock: SimulationClock,
    sampler: OrbitSampler,
    display: DisplayConfig,
    states: Vec<BodyState>,
}

impl SimulationController {
    /// Check the catalog against the provider, place every body at the
    /// start instant and sample all orbit paths.
    pub fn new(
        registry: BodyRegistry,
        provider: Box<dyn EphemerisProvider>,
        settings: &SimulationSettings,
    ) -> Result<Self, SimulationError> {
        check_min_size(settings.display.min_size)?;
        check_time_scale(settings.time_scale)?;
        let sampler = OrbitSampler::new(settings.orbit_samples)?;

        for body in registry.iter() {
            let primary = provider.primary(body.id).map_err(|err| match err {
                EphemerisError::UnknownBody(id) => {
                    SimulationError::from(ConfigurationError::UnknownBody(id))
                }
                other => SimulationError::from(other),
            })?;
            if primary != body.parent {
                return Err(ConfigurationError::ParentMismatch {
                    body: body.id,
                    catalog: body.parent,
                    ephemeris: primary,
                }
                .into());
            }
        }

        let mut controller = Self {
            states: vec![BodyState::default(); registry.len()],
            registry,
            provider,
            clock: SimulationClock::new(settings.start, settings.time_scale),
            sampler,
            display: settings.display,
        };
        controller.jump_to(settings.start)?;
        Ok(controller)
    }

    /// Advance by `elapsed_real_seconds` of wall time.
    ///
    /// On error nothing changes: the clock keeps its instant and every body
    /// keeps its previous state.
    pub fn tick(&mut self, elapsed_real_seconds: f64) -> Result<(), SimulationError> {
        if !elapsed_real_seconds.is_finite() {
            return Err(SimulationError::NonFiniteElapsed(elapsed_real_seconds));
        }

        let candidate = self.clock.advanced_by(elapsed_real_seconds);
        if candidate == self.clock.instant() {
            return Ok(());
        }

        let placed = self.place_all(candidate)?;
        self.clock.set_instant(candidate);
        self.commit(candidate, placed);
        Ok(())
    }

    /// Move the clock straight to `instant`, refreshing positions and orbit
    /// paths. Use this for long jumps instead of a huge tick.
    pub fn jump_to(&mut self, instant: SimInstant) -> Result<(), SimulationError> {
        let placed = self.place_all(instant)?;
        let orbits = self.sample_all(instant)?;

        self.clock.set_instant(instant);
        self.commit(instant, placed);
        for (state, orbit) in self.states.iter_mut().zip(orbits) {
            state.orbit = orbit;
        }
        Ok(())
    }

    /// Jump back to the start instant.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.jump_to(self.clock.start())
    }

    /// Resample every orbit path starting at the current instant.
    pub fn resample_orbits(&mut self) -> Result<(), SimulationError> {
        let instant = self.clock.instant();
        let orbits = self.sample_all(instant)?;
        for (state, orbit) in self.states.iter_mut().zip(orbits) {
            state.orbit = orbit;
        }
        debug!("Resampled orbit paths at {}", instant);
        Ok(())
    }

    pub fn set_time_scale(&mut self, rate: f64) -> Result<(), ConfigurationError> {
        check_time_scale(rate)?;
        self.clock.set_rate(rate);
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn set_min_size(&mut self, min_size: f32) -> Result<(), ConfigurationError> {
        check_min_size(min_size)?;
        self.display.min_size = min_size;
        for (body, state) in self.registry.iter().zip(&mut self.states) {
            state.visual_radius = visual_radius(body.radius_km, min_size);
        }
        Ok(())
    }

    pub fn set_labels_visible(&mut self, visible: bool) {
        self.display.labels_visible = visible;
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.display.overlay_visible = visible;
    }

    pub fn current_instant(&self) -> SimInstant {
        self.clock.instant()
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.rate()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Raw state of the body at `index` in catalog order.
    pub fn state(&self, index: usize) -> Option<&BodyState> {
        self.states.get(index)
    }

    /// Every body in catalog order.
    pub fn bodies(&self) -> impl Iterator<Item = BodySnapshot<'_>> {
        (0..self.states.len()).map(|i| self.snapshot_at(i))
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot<'_>> {
        self.bodies().collect()
    }

    pub fn body(&self, id: BodyId) -> Option<BodySnapshot<'_>> {
        self.registry.index_of(id).map(|i| self.snapshot_at(i))
    }

    fn snapshot_at(&self, index: usize) -> BodySnapshot<'_> {
        let body: &Body = &self.registry.as_slice()[index];
        let state = &self.states[index];
        // Narrowing can round a phase just below 2π up to exactly 2π.
        let rotation_phase = state.rotation_phase as f32;
        BodySnapshot {
            id: body.id,
            name: &body.name,
            color: body.color,
            position: state.position,
            visual_radius: state.visual_radius,
            rotation_phase: if rotation_phase >= TAU { 0.0 } else { rotation_phase },
            orbit: state.orbit.as_ref(),
            parent_anchor: self
                .registry
                .parent_index(index)
                .map(|p| self.states[p].position),
        }
    }

    /// Positions of every body at `instant`, without touching any state.
    fn place_all(&self, instant: SimInstant) -> Result<Vec<Placed>, EphemerisError> {
        let mut placed: Vec<Placed> = Vec::with_capacity(self.states.len());
        for (index, body) in self.registry.iter().enumerate() {
            let parent_position = self
                .registry
                .parent_index(index)
                .map_or(Vec3::ZERO, |p| placed[p].0);
            let placement = locate(body, self.provider.as_ref(), instant)?;
            let offset = body.parent.is_some().then(|| placement.resolve(Vec3::ZERO));
            placed.push((placement.resolve(parent_position), offset));
        }
        Ok(placed)
    }

    fn sample_all(
        &self,
        reference: SimInstant,
    ) -> Result<Vec<Option<OrbitPolyline>>, SimulationError> {
        self.registry
            .iter()
            .map(|body| self.sampler.sample(body, self.provider.as_ref(), reference))
            .collect()
    }

    fn commit(&mut self, instant: SimInstant, placed: Vec<Placed>) {
        let min_size = self.display.min_size;
        for ((body, state), (position, offset)) in
            self.registry.iter().zip(&mut self.states).zip(placed)
        {
            state.position = position;
            state.offset = offset;
            state.visual_radius = visual_radius(body.radius_km, min_size);
            state.rotation_phase = body
                .rotation_period_hours
                .map_or(0.0, |hours| rotation_phase(instant, hours));
        }
    }
}

fn check_min_size(min_size: f32) -> Result<(), ConfigurationError> {
    if min_size.is_finite() && min_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidMinSize(min_size as f64))
    }
}

fn check_time_scale(rate: f64) -> Result<(), ConfigurationError> {
    if rate.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidTimeScale(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::KeplerEphemeris;
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    fn midnight() -> SimInstant {
        SimInstant::parse_rfc3339("2000-01-01T00:00:00Z").unwrap()
    }

    fn controller_at(start: SimInstant) -> SimulationController {
        let settings = SimulationSettings {
            start,
            ..Default::default()
        };
        SimulationController::new(
            BodyRegistry::builtin().unwrap(),
            Box::new(KeplerEphemeris::new()),
            &settings,
        )
        .unwrap()
    }

    fn states(controller: &SimulationController) -> Vec<BodyState> {
        (0..controller.registry().len())
            .map(|i| controller.state(i).unwrap().clone())
            .collect()
    }

    #[test]
    fn test_one_second_at_one_day_per_second() {
        let mut sim = controller_at(midnight());
        let earth_before = sim.body(BodyId::Earth).unwrap().position.as_dvec3();

        sim.tick(1.0).unwrap();

        assert_eq!(sim.current_instant().to_string(), "2000-01-02 00:00:00 UTC");
        let earth_after = sim.body(BodyId::Earth).unwrap().position.as_dvec3();
        let degrees = earth_before.angle_between(earth_after).to_degrees();
        assert!((0.95..1.1).contains(&degrees), "Earth moved {degrees}°");
    }

    #[test]
    fn test_zero_tick_changes_nothing() {
        let mut sim = controller_at(midnight());
        sim.tick(0.3).unwrap();
        let before = states(&sim);
        let instant = sim.current_instant();

        sim.tick(0.0).unwrap();

        assert_eq!(sim.current_instant(), instant);
        assert_eq!(states(&sim), before);
    }

    #[test]
    fn test_moons_sit_at_parent_plus_offset() {
        let mut sim = controller_at(midnight());
        for _ in 0..10 {
            sim.tick(0.37).unwrap();
            for snapshot in sim.bodies() {
                let index = sim.registry().index_of(snapshot.id).unwrap();
                let state = sim.state(index).unwrap();
                match (snapshot.parent_anchor, state.offset) {
                    (Some(anchor), Some(offset)) => {
                        assert_eq!(snapshot.position, anchor + offset);
                    }
                    (None, None) => {}
                    other => panic!("{} has inconsistent parenting {other:?}", snapshot.id),
                }
            }
        }
    }

    #[test]
    fn test_visual_radius_respects_min_size() {
        let mut sim = controller_at(midnight());
        sim.set_min_size(0.2).unwrap();
        for snapshot in sim.bodies() {
            assert!(snapshot.visual_radius >= 0.2);
        }
        // The Sun is larger than the minimum and keeps its physical size.
        assert_relative_eq!(sim.body(BodyId::Sun).unwrap().visual_radius, 0.465, epsilon = 1e-3);
        assert_eq!(sim.body(BodyId::Earth).unwrap().visual_radius, 0.2);
    }

    #[test]
    fn test_bad_setters_are_rejected_without_change() {
        let mut sim = controller_at(midnight());
        assert!(sim.set_min_size(0.0).is_err());
        assert!(sim.set_min_size(-1.0).is_err());
        assert!(sim.set_min_size(f32::NAN).is_err());
        assert_eq!(sim.display().min_size, 0.5);

        assert!(sim.set_time_scale(f64::INFINITY).is_err());
        assert_eq!(sim.time_scale(), 1.0);
        sim.set_time_scale(-30.0).unwrap();
        assert_eq!(sim.time_scale(), -30.0);
    }

    #[test]
    fn test_non_finite_elapsed_rejected() {
        let mut sim = controller_at(midnight());
        assert!(matches!(sim.tick(f64::NAN), Err(SimulationError::NonFiniteElapsed(_))));
        assert_eq!(sim.current_instant(), midnight());
    }

    #[test]
    fn test_range_error_leaves_state_untouched() {
        let settings = SimulationSettings {
            start: SimInstant::J2000,
            ..Default::default()
        };
        // Just over a year: enough to sample Earth's orbit at startup.
        let mut sim = SimulationController::new(
            fixtures::earth_moon_registry(),
            Box::new(KeplerEphemeris::with_span_years(1.1)),
            &settings,
        )
        .unwrap();
        let before = states(&sim);

        sim.set_time_scale(1000.0).unwrap();
        let err = sim.tick(1.0).unwrap_err();

        assert!(matches!(err, SimulationError::Ephemeris(EphemerisError::OutOfRange { .. })));
        assert_eq!(sim.current_instant(), SimInstant::J2000);
        assert_eq!(states(&sim), before);
    }

    #[test]
    fn test_toggles_update_display_config() {
        let mut sim = controller_at(midnight());
        sim.set_labels_visible(false);
        sim.set_overlay_visible(true);
        assert!(!sim.display().labels_visible);
        assert!(sim.display().overlay_visible);
    }

    #[test]
    fn test_jump_and_reset_resample_orbits() {
        let mut sim = controller_at(midnight());
        let later = midnight().plus_days(400.0);

        sim.jump_to(later).unwrap();
        let earth = sim.body(BodyId::Earth).unwrap();
        assert_eq!(earth.orbit.unwrap().reference, later);

        sim.reset().unwrap();
        assert_eq!(sim.current_instant(), midnight());
        let earth = sim.body(BodyId::Earth).unwrap();
        assert_eq!(earth.orbit.unwrap().reference, midnight());
    }

    #[test]
    fn test_ticks_do_not_resample() {
        let mut sim = controller_at(midnight());
        sim.tick(5.0).unwrap();
        let mars = sim.body(BodyId::Mars).unwrap();
        assert_eq!(mars.orbit.unwrap().reference, midnight());

        sim.resample_orbits().unwrap();
        let mars = sim.body(BodyId::Mars).unwrap();
        assert_eq!(mars.orbit.unwrap().reference, sim.current_instant());
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut sim = controller_at(midnight());
        sim.toggle_pause();
        assert!(sim.is_paused());
        sim.tick(10.0).unwrap();
        assert_eq!(sim.current_instant(), midnight());
        sim.toggle_pause();
        assert_eq!(sim.time_scale(), 1.0);
    }

    #[test]
    fn test_provider_must_cover_catalog() {
        let registry = BodyRegistry::builtin().unwrap();
        let err = SimulationController::new(
            registry,
            Box::new(fixtures::CircularEphemeris::earth_moon()),
            &SimulationSettings::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            SimulationError::Configuration(ConfigurationError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_catalog_parent_must_match_provider() {
        let mut bodies: Vec<Body> = BodyRegistry::builtin().unwrap().iter().cloned().collect();
        for body in &mut bodies {
            if body.id == BodyId::Titan {
                body.parent = Some(BodyId::Jupiter);
            }
        }
        // Keep Jupiter before Titan: it already is in the built-in order.
        let registry = BodyRegistry::new(bodies).unwrap();
        let err = SimulationController::new(
            registry,
            Box::new(KeplerEphemeris::new()),
            &SimulationSettings::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            SimulationError::Configuration(ConfigurationError::ParentMismatch {
                body: BodyId::Titan,
                ..
            })
        ));
    }

    #[test]
    fn test_circular_fixture_places_moon_on_parent() {
        let sim = SimulationController::new(
            fixtures::earth_moon_registry(),
            Box::new(fixtures::CircularEphemeris::earth_moon()),
            &SimulationSettings {
                start: SimInstant::J2000,
                ..Default::default()
            },
        )
        .unwrap();

        let earth = sim.body(BodyId::Earth).unwrap();
        let moon = sim.body(BodyId::Moon).unwrap();
        // Both start on the +x axis of the ecliptic.
        assert_relative_eq!(earth.position.x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(
            moon.position.x - earth.position.x,
            crate::scaling::km_to_display_distance(384_400.0) as f32,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_snapshot_phase_stays_below_full_turn() {
        let mut sim = controller_at(midnight());
        let earth = sim.registry().index_of(BodyId::Earth).unwrap();
        sim.states[earth].rotation_phase = std::f64::consts::TAU - 1e-12;

        let phase = sim.body(BodyId::Earth).unwrap().rotation_phase;
        assert!((0.0..TAU).contains(&phase), "phase {phase}");
    }

    #[test]
    fn test_retrograde_bodies_spin_backwards() {
        let mut sim = controller_at(midnight());
        let venus = sim.registry().index_of(BodyId::Venus).unwrap();
        let before = sim.state(venus).unwrap().rotation_phase;

        // Venus turns once in ~243 days; one day is a small step backwards.
        sim.tick(1.0).unwrap();
        let after = sim.state(venus).unwrap().rotation_phase;
        let step = (after - before).rem_euclid(std::f64::consts::TAU);
        assert!(step > std::f64::consts::PI, "Venus stepped {step} rad forward");
    }
}
