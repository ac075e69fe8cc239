//! Diagnostic reports
//!
//! Reports are plain data rendered through `Display`; the transport is the
//! caller's business and is plugged in through [`ReportSink`]. Wording is not
//! a compatibility contract, the fields are.

use core::fmt;

use stim_core::{Duration, SessionConfig, WaveformTiming};

const RULE: &str = "========================================";

/// Measured average frequency, `cycles / elapsed_seconds`
///
/// Returns `0.0` for a zero elapsed time instead of dividing by zero.
pub fn measured_frequency(cycles: u64, elapsed: Duration) -> f32 {
    if elapsed.is_zero() {
        return 0.0;
    }
    (cycles as f64 * 1_000_000.0 / elapsed.as_micros() as f64) as f32
}

/// Effective configuration, emitted once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupBanner {
    pub timing: WaveformTiming,
    pub session: SessionConfig,
    pub report_interval: Duration,
    pub output_pin: u8,
}

impl fmt::Display for StartupBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timing = &self.timing;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Square-Wave Stimulation Controller")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Frequency:    {} Hz", timing.target_hz())?;
        writeln!(
            f,
            "  Effective:    {:.4} Hz (error {:+.4} Hz)",
            timing.actual_frequency_hz(),
            timing.frequency_error_hz()
        )?;
        writeln!(f, "  Period:       {} us", timing.period().as_micros())?;
        writeln!(f, "  On time:      {} us", timing.on_time().as_micros())?;
        writeln!(f, "  Off time:     {} us", timing.off_time().as_micros())?;
        writeln!(f, "  Duty cycle:   {:.0}%", timing.duty_percent())?;
        writeln!(f, "  Session:      {}", self.session)?;
        writeln!(f, "  Report every: {} s", self.report_interval.as_secs())?;
        writeln!(f, "  GPIO pin:     {}", self.output_pin)?;
        write!(f, "{}", RULE)
    }
}

/// Periodic progress line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    pub elapsed: Duration,
    pub cycles: u64,
    pub measured_hz: f32,
}

impl StatusLine {
    /// Build a status line, computing the measured frequency
    pub fn new(elapsed: Duration, cycles: u64) -> Self {
        Self {
            elapsed,
            cycles,
            measured_hz: measured_frequency(cycles, elapsed),
        }
    }

    /// Whole minutes of elapsed time (not capped at 99)
    pub fn minutes(&self) -> u64 {
        self.elapsed.as_secs() / 60
    }

    /// Seconds past the whole minute
    pub fn seconds(&self) -> u64 {
        self.elapsed.as_secs() % 60
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}] Cycles: {}  ({:.1} Hz actual)",
            self.minutes(),
            self.seconds(),
            self.cycles,
            self.measured_hz
        )
    }
}

/// Final report, emitted once when the session expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Configured session length
    pub minutes: u32,
    /// Cycles generated over the whole session
    pub cycles: u64,
    /// Elapsed time observed by the poll that stopped the session
    pub elapsed: Duration,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Session complete: {} minutes", self.minutes)?;
        writeln!(f, "  Total cycles: {}", self.cycles)?;
        write!(f, "{}", RULE)
    }
}

/// Anything the controller writes to the diagnostic channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    Startup(StartupBanner),
    Status(StatusLine),
    Complete(SessionSummary),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Startup(banner) => banner.fmt(f),
            Report::Status(line) => line.fmt(f),
            Report::Complete(summary) => summary.fmt(f),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Report {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Report::Startup(banner) => defmt::write!(
                fmt,
                "startup: {} Hz, {}, session {} min, pin {}",
                banner.timing.target_hz(),
                banner.timing,
                banner.session.minutes,
                banner.output_pin
            ),
            Report::Status(line) => defmt::write!(
                fmt,
                "[{}:{}] cycles: {} ({} Hz actual)",
                line.minutes(),
                line.seconds(),
                line.cycles,
                line.measured_hz
            ),
            Report::Complete(summary) => defmt::write!(
                fmt,
                "session complete: {} min, {} cycles",
                summary.minutes,
                summary.cycles
            ),
        }
    }
}

/// Diagnostic channel
///
/// Called from poll context only; the interrupt handler never reports.
pub trait ReportSink {
    /// Deliver one report
    fn emit(&mut self, report: &Report);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, report: &Report) {
        (**self).emit(report)
    }
}
