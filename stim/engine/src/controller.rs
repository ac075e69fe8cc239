//! Poll-loop controller

use embedded_hal::delay::DelayNs;
use stim_core::{Instant, StimConfig, StimError, StimResult, WaveformTiming};
use stim_hal::MonotonicClock;

use crate::generator::WaveformControl;
use crate::report::{Report, ReportSink, SessionSummary, StartupBanner};
use crate::reporter::StatusReporter;
use crate::session::{SessionController, SessionState};

/// Single owned controller, constructed once at startup
///
/// Holds the validated configuration, the poll-side components and the
/// diagnostic sink, and borrows the generator it controls.
pub struct Controller<'a, C: ?Sized, S> {
    config: StimConfig,
    timing: WaveformTiming,
    control: &'a C,
    sink: S,
    session: SessionController,
    reporter: StatusReporter,
    started: bool,
}

impl<'a, C, S> Controller<'a, C, S>
where
    C: WaveformControl + ?Sized,
    S: ReportSink,
{
    /// Validate `config` and build the controller
    ///
    /// An invalid configuration is rejected here, before anything is armed.
    pub fn new(config: StimConfig, control: &'a C, sink: S) -> StimResult<Self> {
        let timing = config.validate().map_err(|err| {
            error!("configuration rejected: {}", err);
            err
        })?;

        Ok(Self {
            config,
            timing,
            control,
            sink,
            session: SessionController::new(config.session),
            reporter: StatusReporter::new(config.report_interval),
            started: false,
        })
    }

    /// Emit the startup banner, arm the generator and start the clocks
    ///
    /// A generator that is already running or has already been halted is
    /// rejected before anything is written to the sink.
    pub fn start(&mut self, now: Instant) -> StimResult<()> {
        let state = self.control.snapshot();
        if self.started || state.running {
            return Err(StimError::AlreadyArmed);
        }
        if state.has_stopped() {
            return Err(StimError::SessionStopped);
        }

        self.sink.emit(&Report::Startup(self.banner()));

        if let Err(err) = self.control.arm(now) {
            error!("generator failed to arm: {}", err);
            return Err(err);
        }

        self.session.initialize(now);
        self.reporter.initialize(now);
        self.started = true;
        info!(
            "generator armed: period {}, on {}, off {}",
            self.timing.period(),
            self.timing.on_time(),
            self.timing.off_time()
        );
        Ok(())
    }

    /// One cooperative pass: status report, then session expiry
    ///
    /// Does nothing before [`start`](Controller::start). Status lines keep
    /// coming after the session has stopped, with the cycle count frozen.
    pub fn poll(&mut self, now: Instant) -> SessionState {
        if !self.started {
            return self.session.state();
        }
        self.reporter.poll(now, self.control, &mut self.sink);
        self.session.poll(now, self.control, &mut self.sink)
    }

    /// Poll until the session stops, idling `poll_interval` between passes
    ///
    /// Never returns for a continuous session. The stop happens within one
    /// poll interval of the deadline.
    pub fn run_session<K, D>(&mut self, clock: &K, delay: &mut D) -> SessionSummary
    where
        K: MonotonicClock + ?Sized,
        D: DelayNs,
    {
        let idle_us = self.idle_us();
        loop {
            let now = Instant::now(clock);
            if self.poll(now) == SessionState::Stopped {
                return self.session.summary().unwrap_or_else(|| SessionSummary {
                    minutes: self.config.session.minutes,
                    cycles: self.control.snapshot().cycle_count,
                    elapsed: now.elapsed_since(self.session.started_at()),
                });
            }
            delay.delay_us(idle_us);
        }
    }

    /// Poll until power-off
    ///
    /// Runs the session to completion and then keeps reporting.
    pub fn run_forever<K, D>(&mut self, clock: &K, delay: &mut D) -> !
    where
        K: MonotonicClock + ?Sized,
        D: DelayNs,
    {
        let idle_us = self.idle_us();
        loop {
            self.poll(Instant::now(clock));
            delay.delay_us(idle_us);
        }
    }

    fn idle_us(&self) -> u32 {
        u32::try_from(self.config.poll_interval.as_micros()).unwrap_or(u32::MAX)
    }

    /// Startup banner for the current configuration
    pub fn banner(&self) -> StartupBanner {
        StartupBanner {
            timing: self.timing,
            session: self.config.session,
            report_interval: self.config.report_interval,
            output_pin: self.config.output_pin,
        }
    }

    /// Validated configuration
    pub fn config(&self) -> &StimConfig {
        &self.config
    }

    /// Derived waveform timing
    pub fn timing(&self) -> &WaveformTiming {
        &self.timing
    }

    /// Check if `start` has succeeded
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Session lifecycle state
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Access the diagnostic sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the diagnostic sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
