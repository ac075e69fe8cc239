//! Controller configuration and derived waveform timing
//!
//! Everything here is fixed once at startup. [`StimConfig::validate`] is the
//! single fail-fast gate: a configuration that passes it always yields a
//! waveform whose on and off phases are both at least one microsecond long.

use core::fmt;

use stim_hal::Level;

use crate::time::{Duration, MICROS_PER_SEC};
use crate::{StimError, StimResult};

/// Shortest period the generator accepts (one microsecond per phase)
pub const MIN_PERIOD_US: u64 = 2;

/// Target frequency and duty cycle of the output waveform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformConfig {
    /// Target toggle rate in hertz
    pub frequency_hz: f32,
    /// Fraction of each period spent HIGH, in (0, 1]
    pub duty_cycle: f32,
}

impl WaveformConfig {
    /// Create a waveform configuration (validated by [`WaveformConfig::timing`])
    pub const fn new(frequency_hz: f32, duty_cycle: f32) -> Self {
        Self {
            frequency_hz,
            duty_cycle,
        }
    }

    /// Derive integer-microsecond phase lengths
    ///
    /// `period = round(1e6 / frequency)`, `on = round(period * duty)`,
    /// `off = period - on`. Each phase is clamped to at least 1us, so a duty
    /// cycle of exactly 1.0 produces a 1us off pulse rather than a flat line.
    pub fn timing(&self) -> StimResult<WaveformTiming> {
        let frequency = self.frequency_hz;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(StimError::InvalidFrequency);
        }
        let duty = self.duty_cycle;
        if !(duty > 0.0 && duty <= 1.0) {
            return Err(StimError::InvalidDutyCycle);
        }

        let period_us = libm::round(MICROS_PER_SEC as f64 / f64::from(frequency)) as u64;
        if period_us < MIN_PERIOD_US {
            return Err(StimError::FrequencyTooHigh);
        }

        let on_us = (libm::round(period_us as f64 * f64::from(duty)) as u64).clamp(1, period_us - 1);

        Ok(WaveformTiming {
            target_hz: frequency,
            period: Duration::from_micros(period_us),
            on_time: Duration::from_micros(on_us),
            off_time: Duration::from_micros(period_us - on_us),
        })
    }
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self::new(40.0, 0.5)
    }
}

/// Integer-microsecond phase lengths derived from a [`WaveformConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformTiming {
    target_hz: f32,
    period: Duration,
    on_time: Duration,
    off_time: Duration,
}

impl WaveformTiming {
    /// Full on+off period
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Length of the HIGH phase
    pub const fn on_time(&self) -> Duration {
        self.on_time
    }

    /// Length of the LOW phase
    pub const fn off_time(&self) -> Duration {
        self.off_time
    }

    /// Length of the phase the output spends at `level`
    pub const fn phase(&self, level: Level) -> Duration {
        match level {
            Level::High => self.on_time,
            Level::Low => self.off_time,
        }
    }

    /// Both phases have the same length, so a fixed timer interval suffices
    pub fn is_symmetric(&self) -> bool {
        self.on_time == self.off_time
    }

    /// Frequency the caller asked for
    pub const fn target_hz(&self) -> f32 {
        self.target_hz
    }

    /// Frequency the generator actually produces after rounding
    pub fn actual_frequency_hz(&self) -> f32 {
        (MICROS_PER_SEC as f64 / self.period.as_micros() as f64) as f32
    }

    /// Signed rounding error, `actual - target`
    pub fn frequency_error_hz(&self) -> f32 {
        self.actual_frequency_hz() - self.target_hz
    }

    /// Effective duty cycle in percent
    pub fn duty_percent(&self) -> f32 {
        (self.on_time.as_micros() as f64 * 100.0 / self.period.as_micros() as f64) as f32
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WaveformTiming {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "WaveformTiming{{period: {}, on: {}, off: {}}}",
            self.period,
            self.on_time,
            self.off_time
        );
    }
}

/// Session length; zero minutes means run until power-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Auto-stop threshold in minutes
    pub minutes: u32,
}

impl SessionConfig {
    /// Session that never stops on its own
    pub const CONTINUOUS: Self = Self { minutes: 0 };

    /// Create a session configuration
    pub const fn new(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Check if the session runs indefinitely
    pub const fn is_continuous(&self) -> bool {
        self.minutes == 0
    }

    /// Elapsed time after which the session stops
    pub const fn limit(&self) -> Option<Duration> {
        if self.minutes == 0 {
            None
        } else {
            Some(Duration::from_minutes(self.minutes as u64))
        }
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_continuous() {
            write!(f, "0 min (continuous)")
        } else {
            write!(f, "{} min", self.minutes)
        }
    }
}

/// Complete startup configuration of the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimConfig {
    /// Output waveform
    pub waveform: WaveformConfig,
    /// Auto-stop threshold
    pub session: SessionConfig,
    /// Cadence of status reports
    pub report_interval: Duration,
    /// Idle delay between poll-loop passes
    pub poll_interval: Duration,
    /// Identifier of the output pin, echoed in the startup banner
    pub output_pin: u8,
}

impl StimConfig {
    /// Default report cadence
    pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

    /// Default poll-loop idle delay
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// 40 Hz, 50 % duty, 60 minute session, report every 10 s, GPIO2
    pub const fn new() -> Self {
        Self {
            waveform: WaveformConfig::new(40.0, 0.5),
            session: SessionConfig::new(60),
            report_interval: Self::DEFAULT_REPORT_INTERVAL,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            output_pin: 2,
        }
    }

    /// Replace the output waveform
    pub const fn with_waveform(mut self, frequency_hz: f32, duty_cycle: f32) -> Self {
        self.waveform = WaveformConfig::new(frequency_hz, duty_cycle);
        self
    }

    /// Replace the session length
    pub const fn with_session_minutes(mut self, minutes: u32) -> Self {
        self.session = SessionConfig::new(minutes);
        self
    }

    /// Replace the report cadence
    pub const fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Replace the poll-loop idle delay
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Replace the output pin identifier
    pub const fn with_output_pin(mut self, pin: u8) -> Self {
        self.output_pin = pin;
        self
    }

    /// Check every field and derive the waveform timing
    pub fn validate(&self) -> StimResult<WaveformTiming> {
        if self.report_interval.is_zero() {
            return Err(StimError::InvalidReportInterval);
        }
        if self.poll_interval.is_zero() {
            return Err(StimError::InvalidPollInterval);
        }
        self.waveform.timing()
    }
}

impl Default for StimConfig {
    fn default() -> Self {
        Self::new()
    }
}
