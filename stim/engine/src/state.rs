//! Runtime state shared between interrupt and poll contexts

use stim_core::{Duration, Instant};
use stim_hal::Level;

/// Mutable state of the generator
///
/// Access discipline: while the generator is armed only the interrupt handler
/// writes `level` and `cycle_count`. The poll loop writes `running` and, after
/// disarming, forces `level` low. Every access goes through a critical
/// section (see [`SharedGenerator`](crate::SharedGenerator)), so reads are
/// never torn even though the target has no atomic read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeState {
    /// Level currently driven on the output line
    pub level: Level,
    /// Completed on+off cycles, counted on each transition into HIGH
    pub cycle_count: u64,
    /// Generator has been armed and not yet halted
    pub running: bool,
    /// Timestamp taken when the generator was armed
    pub started_at: Option<Instant>,
}

impl RuntimeState {
    /// Initial state: output low, nothing counted, not yet armed
    pub const fn new() -> Self {
        Self {
            level: Level::Low,
            cycle_count: 0,
            running: false,
            started_at: None,
        }
    }

    /// The generator ran and was halted; this state is terminal
    pub const fn has_stopped(&self) -> bool {
        self.started_at.is_some() && !self.running
    }

    /// Time since the generator was armed, zero if it never was
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => now.elapsed_since(start),
            None => Duration::ZERO,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RuntimeState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RuntimeState{{level: {}, cycles: {}, running: {}}}",
            self.level,
            self.cycle_count,
            self.running
        );
    }
}
