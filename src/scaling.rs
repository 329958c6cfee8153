//! Conversion from astronomical coordinates to display units.
//!
//! The ephemeris frame is the J2000 ecliptic with z towards ecliptic north.
//! The display frame is Bevy's y-up frame. The mapping `(x, y, z) -> (x, z, -y)`
//! is a proper rotation, so distances and handedness survive the change.

use bevy::math::{DVec3, Vec3};

use crate::types::AU_KM;

/// Display units per astronomical unit.
pub const K_AU: f64 = 100.0;

/// Display units per kilometre.
pub const K_KM: f64 = K_AU / AU_KM;

/// Scale a distance in AU to display units.
pub fn to_display_distance(au: f64) -> f64 {
    au * K_AU
}

/// Scale a distance in km to display units.
pub fn km_to_display_distance(km: f64) -> f64 {
    km * K_KM
}

/// Rotate an ecliptic-frame vector into the display frame.
pub fn ecliptic_to_display(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, -v.y)
}

/// Heliocentric position in AU to a display position.
pub fn heliocentric_to_display(au: DVec3) -> Vec3 {
    (ecliptic_to_display(au) * K_AU).as_vec3()
}

/// Parent-relative offset in km to a display offset.
pub fn relative_to_display(km: DVec3) -> Vec3 {
    (ecliptic_to_display(km) * K_KM).as_vec3()
}

/// Rendered radius of a body, never smaller than `min_size`.
pub fn visual_radius(radius_km: f64, min_size: f32) -> f32 {
    (km_to_display_distance(radius_km) as f32).max(min_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_au_is_one_hundred_units() {
        assert_eq!(to_display_distance(1.0), 100.0);
        assert_relative_eq!(km_to_display_distance(AU_KM), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ecliptic_north_is_display_up() {
        let up = heliocentric_to_display(DVec3::Z);
        assert_relative_eq!(up.y, 100.0);
        assert_relative_eq!(up.x, 0.0);
        assert_relative_eq!(up.z, 0.0);

        let y = heliocentric_to_display(DVec3::Y);
        assert_relative_eq!(y.z, -100.0);
    }

    #[test]
    fn test_frame_change_preserves_distances() {
        let a = DVec3::new(0.3, -1.2, 0.05);
        let b = DVec3::new(-2.0, 0.4, -0.1);
        let display = heliocentric_to_display(a).distance(heliocentric_to_display(b));
        assert_relative_eq!(display as f64, a.distance(b) * K_AU, max_relative = 1e-6);
    }

    #[test]
    fn test_relative_and_heliocentric_agree() {
        let km = DVec3::new(384_400.0, 1_000.0, -20_000.0);
        let via_km = relative_to_display(km);
        let via_au = heliocentric_to_display(km / AU_KM);
        assert_relative_eq!(via_km.x, via_au.x, max_relative = 1e-6);
        assert_relative_eq!(via_km.y, via_au.y, max_relative = 1e-6);
        assert_relative_eq!(via_km.z, via_au.z, max_relative = 1e-6);
    }

    #[test]
    fn test_visual_radius_clamps_to_minimum() {
        // Earth is ~0.004 units, far below any usable minimum.
        assert_eq!(visual_radius(6371.0, 0.5), 0.5);
        // The Sun is ~0.465 units.
        let sun = visual_radius(695_700.0, 0.1);
        assert_relative_eq!(sun, 0.465, epsilon = 1e-3);
    }
}
