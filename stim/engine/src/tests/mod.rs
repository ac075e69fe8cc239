//! Unit tests for stim-engine
//!
//! These run on the host with `critical-section/std`, using recording doubles
//! for the pin, the alarm timer and the diagnostic sink.

mod reporter;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin};
use stim_core::WaveformConfig;
use stim_hal::{AlarmTimer, HalError, HalResult, Level};

use crate::generator::{Generator, SharedGenerator};
use crate::report::{Report, ReportSink};

/// Output pin that remembers every level written to it
#[derive(Debug, Default)]
pub struct TestPin {
    pub level: Level,
    pub history: Vec<Level>,
}

impl ErrorType for TestPin {
    type Error = Infallible;
}

impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level = Level::Low;
        self.history.push(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level = Level::High;
        self.history.push(Level::High);
        Ok(())
    }
}

/// Alarm timer that records how it was programmed
#[derive(Debug, Default)]
pub struct TestTimer {
    pub interval_us: Option<u64>,
    pub reloads: Vec<u64>,
    pub running: bool,
    pub stops: usize,
    pub cleared: usize,
    pub fail_with: Option<HalError>,
}

impl AlarmTimer for TestTimer {
    fn start(&mut self, interval_us: u64) -> HalResult<()> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.interval_us = Some(interval_us);
        self.running = true;
        Ok(())
    }

    fn reload(&mut self, interval_us: u64) {
        self.interval_us = Some(interval_us);
        self.reloads.push(interval_us);
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn clear_interrupt(&mut self) {
        self.cleared += 1;
    }
}

/// Sink that keeps every report
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<Report>,
}

impl RecordingSink {
    pub fn completions(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report, Report::Complete(_)))
            .count()
    }

    pub fn statuses(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report, Report::Status(_)))
            .count()
    }
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

pub fn generator(frequency_hz: f32, duty_cycle: f32) -> Generator<TestPin, TestTimer> {
    let timing = WaveformConfig::new(frequency_hz, duty_cycle).timing().unwrap();
    Generator::new(TestPin::default(), TestTimer::default(), timing)
}

pub fn shared(frequency_hz: f32, duty_cycle: f32) -> SharedGenerator<TestPin, TestTimer> {
    let shared = SharedGenerator::new();
    shared.install(generator(frequency_hz, duty_cycle));
    shared
}
