//! Alarm timer driven by a host thread
//!
//! A dedicated thread plays the role of the hardware alarm: it sleeps until
//! the next absolute deadline and then invokes the registered callback, the
//! same way the interrupt controller would call the board's handler. The
//! deadline advances by the current interval after each firing, so the
//! schedule does not drift with callback latency.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use stim_hal::{AlarmTimer, HalError, HalResult};

/// Handler invoked on every firing, from the alarm thread
pub type AlarmCallback = fn();

#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    interval_us: AtomicU64,
}

/// [`AlarmTimer`] backed by a sleeping thread
///
/// `stop` never joins the thread: it is typically called from inside the
/// callback's critical section. A firing already in flight may still reach
/// the callback once after `stop`.
#[derive(Debug)]
pub struct ThreadAlarm {
    callback: AlarmCallback,
    shared: Option<Arc<Shared>>,
}

impl ThreadAlarm {
    /// Create a stopped alarm that will call `callback` on each firing
    pub const fn new(callback: AlarmCallback) -> Self {
        Self {
            callback,
            shared: None,
        }
    }

    /// Check if the alarm thread is firing
    pub fn is_running(&self) -> bool {
        self.shared
            .as_ref()
            .is_some_and(|shared| shared.running.load(Ordering::Acquire))
    }

    /// Interval the next deadline will be computed from
    pub fn interval_us(&self) -> Option<u64> {
        self.shared
            .as_ref()
            .map(|shared| shared.interval_us.load(Ordering::Acquire))
    }
}

impl AlarmTimer for ThreadAlarm {
    fn start(&mut self, interval_us: u64) -> HalResult<()> {
        if interval_us == 0 {
            return Err(HalError::InvalidInterval);
        }
        if self.is_running() {
            return Err(HalError::Busy);
        }

        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            interval_us: AtomicU64::new(interval_us),
        });
        let callback = self.callback;
        let worker = Arc::clone(&shared);
        thread::Builder::new()
            .name("stim-alarm".into())
            .spawn(move || alarm_thread(&worker, callback))
            .map_err(|err| {
                log::error!("failed to spawn alarm thread: {}", err);
                HalError::InterruptUnavailable
            })?;

        log::debug!("alarm started, {} us", interval_us);
        self.shared = Some(shared);
        Ok(())
    }

    fn reload(&mut self, interval_us: u64) {
        if let Some(shared) = &self.shared {
            shared.interval_us.store(interval_us, Ordering::Release);
        }
    }

    fn stop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.running.store(false, Ordering::Release);
        }
    }
}

/// Sleep to absolute deadlines and fire until stopped
fn alarm_thread(shared: &Shared, callback: AlarmCallback) {
    let mut deadline = Instant::now();
    loop {
        deadline += Duration::from_micros(shared.interval_us.load(Ordering::Acquire));

        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }

        if !shared.running.load(Ordering::Acquire) {
            break;
        }
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_alarm_fires_at_interval() {
        static FIRINGS: AtomicUsize = AtomicUsize::new(0);

        fn on_alarm() {
            FIRINGS.fetch_add(1, Ordering::SeqCst);
        }

        let mut alarm = ThreadAlarm::new(on_alarm);
        alarm.start(10_000).unwrap();
        assert!(alarm.is_running());

        // Let it run for ~100ms
        thread::sleep(Duration::from_millis(105));
        alarm.stop();
        assert!(!alarm.is_running());

        let count = FIRINGS.load(Ordering::SeqCst);
        // Allow some tolerance for scheduling jitter
        assert!((7..=12).contains(&count), "Expected ~10 firings, got {}", count);

        thread::sleep(Duration::from_millis(30));
        let settled = FIRINGS.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(FIRINGS.load(Ordering::SeqCst), settled);
    }

    #[test]
    fn test_double_start_is_busy() {
        fn noop() {}

        let mut alarm = ThreadAlarm::new(noop);
        alarm.start(1_000).unwrap();
        assert_eq!(alarm.start(1_000), Err(HalError::Busy));
        alarm.stop();
        assert!(alarm.start(1_000).is_ok());
        alarm.stop();
    }

    #[test]
    fn test_zero_interval_rejected() {
        fn noop() {}

        let mut alarm = ThreadAlarm::new(noop);
        assert_eq!(alarm.start(0), Err(HalError::InvalidInterval));
        assert!(!alarm.is_running());
    }

    #[test]
    fn test_reload_changes_interval() {
        fn noop() {}

        let mut alarm = ThreadAlarm::new(noop);
        assert_eq!(alarm.interval_us(), None);
        alarm.start(5_000).unwrap();
        alarm.reload(15_000);
        assert_eq!(alarm.interval_us(), Some(15_000));
        alarm.stop();
    }
}
