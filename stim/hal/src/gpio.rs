//! Output line abstraction
//!
//! The output itself is any `embedded-hal` [`OutputPin`] whose writes cannot
//! fail. Board GPIO drivers (esp-hal `Output`, the host `SimPin`) all use
//! `Infallible` as their error type, which lets the interrupt path write the
//! pin without an error branch.

use core::convert::Infallible;
use core::fmt;
use core::ops::Not;

use embedded_hal::digital::{OutputPin, PinState};

/// Logic level of the output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// Low level, the "off" phase and the rest state
    #[default]
    Low,
    /// High level, the "on" phase
    High,
}

impl Level {
    /// Check if this is the "on" level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this is the "off" level
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "LOW"),
            Level::High => write!(f, "HIGH"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "LOW"),
            Level::High => defmt::write!(fmt, "HIGH"),
        }
    }
}

/// Write `level` to an infallible output pin
#[inline]
pub fn drive<P>(pin: &mut P, level: Level)
where
    P: OutputPin<Error = Infallible>,
{
    match pin.set_state(level.into()) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
