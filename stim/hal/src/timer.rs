//! Alarm timer abstraction

use crate::error::HalResult;

/// Repeating alarm that raises an interrupt every `interval_us` microseconds
///
/// The interrupt handler itself is bound by the board crate; this trait only
/// covers what the waveform generator needs from inside and outside that
/// handler.
pub trait AlarmTimer {
    /// Start firing every `interval_us` microseconds with auto-reload
    fn start(&mut self, interval_us: u64) -> HalResult<()>;

    /// Change the interval used from the next firing on
    ///
    /// Called from interrupt context, so it must not block and cannot fail.
    fn reload(&mut self, interval_us: u64);

    /// Stop firing
    ///
    /// A firing already in flight may still reach the handler once; the
    /// generator ignores it.
    fn stop(&mut self);

    /// Acknowledge the pending interrupt
    fn clear_interrupt(&mut self) {}
}
