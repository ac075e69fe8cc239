//! Simulated board used by the integration tests
//!
//! [`SimClock`] is a shared microsecond counter. [`SimDelay`] advances it and
//! delivers every alarm firing that falls inside the delayed window, so a
//! whole session runs in simulated time with the generator toggling exactly
//! as the hardware interrupt would.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use stim_engine::{Report, ReportSink, SharedGenerator};
use stim_hal::{AlarmTimer, HalError, HalResult, Level, MonotonicClock};

pub type SimGenerator = SharedGenerator<SimPin, SimAlarm>;

#[derive(Debug, Default)]
pub struct SimPin {
    pub level: Level,
    pub edges: u32,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.level.is_high() {
            self.edges += 1;
        }
        self.level = Level::Low;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if self.level.is_low() {
            self.edges += 1;
        }
        self.level = Level::High;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimAlarm {
    pub interval_us: u64,
    pub running: bool,
    pub fail_with: Option<HalError>,
}

impl SimAlarm {
    pub fn failing(err: HalError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }
}

impl AlarmTimer for SimAlarm {
    fn start(&mut self, interval_us: u64) -> HalResult<()> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.interval_us = interval_us;
        self.running = true;
        Ok(())
    }

    fn reload(&mut self, interval_us: u64) {
        self.interval_us = interval_us;
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

#[derive(Debug, Default)]
pub struct SimClock {
    now_us: Cell<u64>,
}

impl SimClock {
    pub fn set(&self, now_us: u64) {
        self.now_us.set(now_us);
    }
}

impl MonotonicClock for SimClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

/// Delay that moves simulated time forward and fires the alarm on schedule
pub struct SimDelay<'a> {
    clock: &'a SimClock,
    generator: &'a SimGenerator,
    next_fire_us: Option<u64>,
}

impl<'a> SimDelay<'a> {
    pub fn new(clock: &'a SimClock, generator: &'a SimGenerator) -> Self {
        Self {
            clock,
            generator,
            next_fire_us: None,
        }
    }

    fn alarm(&self) -> Option<u64> {
        self.generator
            .with(|gen| {
                let alarm = gen.timer_mut();
                alarm.running.then_some(alarm.interval_us)
            })
            .flatten()
    }

    pub fn advance(&mut self, us: u64) {
        let target = self.clock.now_us() + us;
        loop {
            let Some(interval) = self.alarm() else {
                self.next_fire_us = None;
                break;
            };
            let next = *self
                .next_fire_us
                .get_or_insert(self.clock.now_us() + interval);
            if next > target {
                break;
            }
            self.clock.set(next);
            self.generator.on_fire();
            self.next_fire_us = self.alarm().map(|interval| next + interval);
        }
        self.clock.set(target);
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns) / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.advance(u64::from(us));
    }
}

#[derive(Debug, Default)]
pub struct VecSink {
    pub reports: Vec<Report>,
}

impl VecSink {
    pub fn count(&self, pred: impl Fn(&Report) -> bool) -> usize {
        self.reports.iter().filter(|&report| pred(report)).count()
    }
}

impl ReportSink for VecSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}
