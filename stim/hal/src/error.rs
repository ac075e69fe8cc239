//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Interval is zero or beyond what the timer can count
    InvalidInterval,
    /// Timer is already claimed by another user
    Busy,
    /// Interrupt could not be bound to the timer
    InterruptUnavailable,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval => write!(f, "invalid timer interval"),
            Self::Busy => write!(f, "timer busy"),
            Self::InterruptUnavailable => write!(f, "timer interrupt unavailable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidInterval => defmt::write!(fmt, "InvalidInterval"),
            Self::Busy => defmt::write!(fmt, "Busy"),
            Self::InterruptUnavailable => defmt::write!(fmt, "InterruptUnavailable"),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
