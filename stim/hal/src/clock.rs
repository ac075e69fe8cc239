//! Monotonic clock abstraction

/// Free-running microsecond counter
///
/// The epoch is arbitrary; only differences between two readings are
/// meaningful.
pub trait MonotonicClock {
    /// Current time in microseconds since the clock's epoch
    fn now_us(&self) -> u64;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
