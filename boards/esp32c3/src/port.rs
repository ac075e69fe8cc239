//! ESP32-C3 implementations of the controller's hardware seams

use esp_hal::interrupt::InterruptHandler;
use esp_hal::time::{Duration, Instant};
use esp_hal::timer::timg::Timer;
use esp_hal::timer::Timer as TimerTrait;
use esp_println::println;
use stim_engine::{Report, ReportSink};
use stim_hal::{AlarmTimer, HalError, HalResult, MonotonicClock};

/// Timer group alarm with auto-reload
pub struct EspAlarm {
    timer: Timer<'static>,
}

impl EspAlarm {
    /// Bind `handler` to the timer's interrupt; the alarm stays stopped
    pub fn new(timer: Timer<'static>, handler: InterruptHandler) -> Self {
        timer.set_interrupt_handler(handler);
        Self { timer }
    }
}

impl AlarmTimer for EspAlarm {
    fn start(&mut self, interval_us: u64) -> HalResult<()> {
        self.timer
            .load_value(Duration::from_micros(interval_us))
            .map_err(|_| HalError::InvalidInterval)?;
        self.timer.enable_auto_reload(true);
        self.timer.enable_interrupt(true);
        self.timer.start();
        Ok(())
    }

    fn reload(&mut self, interval_us: u64) {
        // Alarm re-enable is required after rewriting the alarm value
        if self
            .timer
            .load_value(Duration::from_micros(interval_us))
            .is_ok()
        {
            self.timer.start();
        }
    }

    fn stop(&mut self) {
        self.timer.enable_interrupt(false);
        self.timer.stop();
        self.timer.clear_interrupt();
    }

    fn clear_interrupt(&mut self) {
        self.timer.clear_interrupt();
    }
}

/// System timer as the monotonic microsecond clock
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

impl MonotonicClock for EspClock {
    fn now_us(&self) -> u64 {
        Instant::now().duration_since_epoch().as_micros()
    }
}

/// Reports on the USB-serial console
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialSink;

impl ReportSink for SerialSink {
    fn emit(&mut self, report: &Report) {
        println!("{}", report);
    }
}
