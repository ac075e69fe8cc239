//! Microsecond time types
//!
//! Every timestamp and interval in the controller is an integer number of
//! microseconds. There is no millisecond clock anywhere, so elapsed times
//! never pick up a rounding offset from mixing units.

use core::fmt;
use core::ops::{Add, Sub};

use stim_hal::MonotonicClock;

/// Microseconds per second
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Microseconds per minute
pub const MICROS_PER_MINUTE: u64 = 60 * MICROS_PER_SEC;

/// Span of time in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration
    pub const ZERO: Self = Self(0);

    /// Maximum duration
    pub const MAX: Self = Self(u64::MAX);

    /// Create duration from microseconds
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create duration from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000))
    }

    /// Create duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(MICROS_PER_SEC))
    }

    /// Create duration from minutes
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes.saturating_mul(MICROS_PER_MINUTE))
    }

    /// Get microsecond count
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Convert to whole milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.0 / 1_000
    }

    /// Convert to whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.0 / MICROS_PER_SEC
    }

    /// Convert to fractional seconds
    pub fn as_secs_f32(&self) -> f32 {
        (self.0 as f64 / MICROS_PER_SEC as f64) as f32
    }

    /// Check if duration is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtract, clamping at zero
    pub const fn saturating_sub(self, other: Duration) -> Duration {
        Duration(self.0.saturating_sub(other.0))
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Duration {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}us", self.0);
    }
}

/// Reading of a monotonic microsecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    /// Clock epoch
    pub const ZERO: Self = Self(0);

    /// Create an instant from a raw clock reading
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Read the current instant from a clock
    pub fn now<K: MonotonicClock + ?Sized>(clock: &K) -> Self {
        Self(clock.now_us())
    }

    /// Get the raw clock reading
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Time elapsed since an earlier instant (handles wraparound)
    pub const fn elapsed_since(self, earlier: Instant) -> Duration {
        Duration(self.0.wrapping_sub(earlier.0))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, earlier: Instant) -> Duration {
        self.elapsed_since(earlier)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "t+{}us", self.0);
    }
}
