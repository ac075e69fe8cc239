//! Simulated output line

use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stim_hal::Level;

/// Output line that tracks its level and counts rising edges
#[derive(Debug, Default)]
pub struct SimPin {
    level: Level,
    rising_edges: u64,
}

impl SimPin {
    pub const fn new() -> Self {
        Self {
            level: Level::Low,
            rising_edges: 0,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Number of LOW to HIGH transitions seen so far
    pub fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    fn set(&mut self, level: Level) {
        if self.level.is_low() && level.is_high() {
            self.rising_edges += 1;
        }
        self.level = level;
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(Level::High);
        Ok(())
    }
}
