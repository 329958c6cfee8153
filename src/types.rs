//! Core units, constants and the simulation instant type.

use std::fmt;

use chrono::{DateTime, Utc};

/// Kilometres per astronomical unit (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century, the time unit of the planetary element rates.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Days per Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// J2000.0 epoch as Unix timestamp (January 1, 2000, 12:00 TT)
/// Note: This is approximate; TT differs from UTC by leap seconds
pub const J2000_UNIX: i64 = 946_728_000;

/// An absolute point in simulated time, stored as seconds since the J2000 epoch.
///
/// Calendar conversions go through `chrono` and treat the epoch as
/// 2000-01-01T12:00:00Z, ignoring the ~64 s TT/UTC offset and leap seconds.
/// That is well below anything visible at display scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct SimInstant(f64);

impl SimInstant {
    /// The J2000.0 epoch itself.
    pub const J2000: SimInstant = SimInstant(0.0);

    /// Create an instant from seconds since J2000.
    pub const fn from_j2000_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Seconds since J2000.
    pub fn j2000_seconds(self) -> f64 {
        self.0
    }

    /// Days since J2000.
    pub fn days_since_j2000(self) -> f64 {
        self.0 / SECONDS_PER_DAY
    }

    /// Julian centuries since J2000.
    pub fn centuries_since_j2000(self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    /// Shift by a (possibly negative or fractional) number of days.
    pub fn plus_days(self, days: f64) -> Self {
        Self(self.0 + days * SECONDS_PER_DAY)
    }

    /// Convert a UTC calendar time (millisecond resolution).
    pub fn from_utc(time: DateTime<Utc>) -> Self {
        let millis = time.timestamp_millis() - J2000_UNIX * 1000;
        Self(millis as f64 / 1000.0)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Parse an RFC 3339 timestamp such as `2000-01-01T00:00:00Z`.
    pub fn parse_rfc3339(text: &str) -> Result<Self, chrono::ParseError> {
        let parsed = DateTime::parse_from_rfc3339(text)?;
        Ok(Self::from_utc(parsed.with_timezone(&Utc)))
    }

    /// Convert back to UTC. Returns `None` when the instant lies outside
    /// the range chrono can represent.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let millis = (self.0 * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 / 2.0 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(J2000_UNIX * 1000 + millis as i64)
    }
}

impl fmt::Display for SimInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "J2000{:+.0}s", self.0),
        }
    }
}
