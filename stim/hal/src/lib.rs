//! Hardware seams for the stimulation controller
//!
//! This crate names the three pieces of hardware the controller touches: one
//! digital output line, one repeating alarm timer and one monotonic
//! microsecond clock. Board crates implement these traits; the engine only
//! ever sees the traits.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod clock;
pub mod error;
pub mod gpio;
pub mod timer;

// Re-export commonly used types
pub use clock::MonotonicClock;
pub use error::{HalError, HalResult};
pub use gpio::{drive, Level};
pub use timer::AlarmTimer;
