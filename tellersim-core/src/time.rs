//! Simulation time management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

const NANOS_PER_MINUTE: u64 = 60 * 1_000_000_000;

/// Simulation time with nanosecond precision
///
/// SimTime represents a point in simulation time, stored as nanoseconds since
/// the simulation start. The service-floor model works in minutes, so minute
/// conversions are provided alongside the usual Duration interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    /// Create a new SimTime at the simulation start (time zero)
    pub const fn zero() -> Self {
        SimTime(0)
    }

    /// Create a SimTime from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        SimTime(nanos)
    }

    /// Create a SimTime from whole minutes
    pub const fn from_minutes(minutes: u64) -> Self {
        SimTime(minutes * NANOS_PER_MINUTE)
    }

    /// Create a SimTime from fractional minutes
    ///
    /// # Panics
    ///
    /// Panics if the input is negative, infinite, or NaN. Simulated time never
    /// runs backwards, so a negative input is a programming error.
    pub fn from_minutes_f64(minutes: f64) -> Self {
        if !minutes.is_finite() {
            panic!("SimTime cannot be created from non-finite value: {minutes}");
        }
        if minutes < 0.0 {
            panic!("SimTime cannot be negative: {minutes}");
        }
        SimTime((minutes * NANOS_PER_MINUTE as f64) as u64)
    }

    /// Create a SimTime from a Duration
    pub fn from_duration(duration: Duration) -> Self {
        SimTime(duration.as_nanos() as u64)
    }

    /// Convert SimTime to a Duration
    pub fn as_duration(&self) -> Duration {
        Duration::from_nanos(self.0)
    }

    /// Get the raw nanosecond value
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// This time expressed in fractional minutes
    pub fn as_minutes(&self) -> f64 {
        self.0 as f64 / NANOS_PER_MINUTE as f64
    }

    /// Calculate the duration since another SimTime
    pub fn duration_since(&self, earlier: SimTime) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }

    /// Add a duration to this SimTime
    pub fn add_duration(&self, duration: Duration) -> Self {
        SimTime(self.0.saturating_add(duration.as_nanos() as u64))
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> Self::Output {
        self.add_duration(rhs)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = Duration;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}min", self.as_minutes())
    }
}
