#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Stim Core
//!
//! Configuration, derived waveform timing, microsecond time types and the
//! error type shared by every crate of the stimulation controller.

use core::fmt;

use stim_hal::HalError;

pub mod config;
pub mod time;

pub use config::*;
pub use time::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the controller
pub type StimResult<T> = Result<T, StimError>;

/// Error types for controller operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimError {
    /// Frequency is zero, negative or not a finite number
    InvalidFrequency,
    /// Frequency leaves less than 2us per period
    FrequencyTooHigh,
    /// Duty cycle is outside (0, 1]
    InvalidDutyCycle,
    /// Report interval is zero
    InvalidReportInterval,
    /// Poll interval is zero
    InvalidPollInterval,
    /// Generator is already armed
    AlreadyArmed,
    /// Session has stopped and cannot be restarted
    SessionStopped,
    /// No generator has been installed in the shared slot
    NotInstalled,
    /// Alarm timer could not be started
    Timer(HalError),
}

impl From<HalError> for StimError {
    fn from(err: HalError) -> Self {
        StimError::Timer(err)
    }
}

impl fmt::Display for StimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StimError::InvalidFrequency => write!(f, "Frequency must be a positive number"),
            StimError::FrequencyTooHigh => write!(f, "Frequency too high (max 500000 Hz)"),
            StimError::InvalidDutyCycle => write!(f, "Duty cycle must be in (0, 1]"),
            StimError::InvalidReportInterval => write!(f, "Report interval must be non-zero"),
            StimError::InvalidPollInterval => write!(f, "Poll interval must be non-zero"),
            StimError::AlreadyArmed => write!(f, "Generator is already armed"),
            StimError::SessionStopped => write!(f, "Session has already stopped"),
            StimError::NotInstalled => write!(f, "No generator installed"),
            StimError::Timer(err) => write!(f, "Alarm timer failed: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StimError {}

#[cfg(feature = "defmt")]
impl defmt::Format for StimError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            StimError::InvalidFrequency => defmt::write!(fmt, "InvalidFrequency"),
            StimError::FrequencyTooHigh => defmt::write!(fmt, "FrequencyTooHigh"),
            StimError::InvalidDutyCycle => defmt::write!(fmt, "InvalidDutyCycle"),
            StimError::InvalidReportInterval => defmt::write!(fmt, "InvalidReportInterval"),
            StimError::InvalidPollInterval => defmt::write!(fmt, "InvalidPollInterval"),
            StimError::AlreadyArmed => defmt::write!(fmt, "AlreadyArmed"),
            StimError::SessionStopped => defmt::write!(fmt, "SessionStopped"),
            StimError::NotInstalled => defmt::write!(fmt, "NotInstalled"),
            StimError::Timer(err) => defmt::write!(fmt, "Timer({})", err),
        }
    }
}
