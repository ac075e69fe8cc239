//! Host port of the stimulation controller
//!
//! Stands in for the board on Linux and other POSIX hosts: a thread plays the
//! alarm interrupt, `std::time::Instant` is the monotonic clock, and the
//! output line is a counter of edges. Used by the `stim-sim` binary to run a
//! session without hardware.

pub mod alarm;
pub mod clock;
pub mod delay;
pub mod pin;
pub mod sink;

pub use alarm::{AlarmCallback, ThreadAlarm};
pub use clock::StdClock;
pub use delay::StdDelay;
pub use pin::SimPin;
pub use sink::StdoutSink;
