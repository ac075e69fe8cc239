#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Stim Engine
//!
//! The three cooperating parts of the stimulation controller:
//!
//! - [`Generator`]: flips the output on every alarm firing (interrupt context)
//! - [`SessionController`]: stops the generator once the session expires
//! - [`StatusReporter`]: periodically reports cycle count and measured frequency
//!
//! [`Controller`] owns the poll-side parts and drives them from a cooperative
//! loop. The generator is reached through [`SharedGenerator`], a
//! critical-section cell that a `static` can hold so the interrupt handler and
//! the poll loop see the same instance.

// This must go first so the macros are visible to the other modules
mod fmt;

pub mod controller;
pub mod generator;
pub mod report;
pub mod reporter;
pub mod session;
pub mod state;

pub use controller::Controller;
pub use generator::{Generator, SharedGenerator, WaveformControl};
pub use report::{measured_frequency, Report, ReportSink, SessionSummary, StartupBanner, StatusLine};
pub use reporter::StatusReporter;
pub use session::{SessionController, SessionState};
pub use state::RuntimeState;

pub use stim_core::{StimConfig, StimError, StimResult};

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[cfg(test)]
mod tests;
