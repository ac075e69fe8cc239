//! Session controller
//!
//! Two states, `Active -> Stopped`, one way. The transition fires once the
//! elapsed time since [`initialize`](SessionController::initialize) reaches
//! the configured session length; a continuous session never leaves
//! `Active`.

use stim_core::{Duration, Instant, SessionConfig};

use crate::generator::WaveformControl;
use crate::report::{Report, ReportSink, SessionSummary};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Generator may be running; expiry not reached yet
    Active,
    /// Stop sequence has run; terminal
    Stopped,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SessionState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SessionState::Active => defmt::write!(fmt, "Active"),
            SessionState::Stopped => defmt::write!(fmt, "Stopped"),
        }
    }
}

/// Enforces the optional auto-stop
#[derive(Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    started_at: Instant,
    state: SessionState,
    summary: Option<SessionSummary>,
}

impl SessionController {
    /// Create a controller for the given session length
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            started_at: Instant::ZERO,
            state: SessionState::Active,
            summary: None,
        }
    }

    /// Record the session start
    pub fn initialize(&mut self, now: Instant) {
        self.started_at = now;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Timestamp recorded by `initialize`
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Instant at which the session expires, `None` when continuous
    pub fn deadline(&self) -> Option<Instant> {
        self.config.limit().map(|limit| self.started_at + limit)
    }

    /// Time left before expiry, `None` when continuous
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.config
            .limit()
            .map(|limit| limit.saturating_sub(now.elapsed_since(self.started_at)))
    }

    /// Summary recorded by the stop sequence
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    /// One poll pass
    ///
    /// No-op for a continuous session, after the session stopped, or while
    /// the generator is not running. Otherwise, once the session length has
    /// elapsed, halts the generator (disarm, then force low, then clear
    /// `running`) and emits the completion summary. The stop sequence runs at
    /// most once no matter how often this is called afterwards.
    pub fn poll<C, S>(&mut self, now: Instant, control: &C, sink: &mut S) -> SessionState
    where
        C: WaveformControl + ?Sized,
        S: ReportSink + ?Sized,
    {
        if self.state == SessionState::Stopped {
            return self.state;
        }
        let Some(limit) = self.config.limit() else {
            return self.state;
        };
        if !control.snapshot().running {
            return self.state;
        }

        let elapsed = now.elapsed_since(self.started_at);
        if elapsed < limit {
            return self.state;
        }

        self.state = SessionState::Stopped;
        if control.halt() {
            let summary = SessionSummary {
                minutes: self.config.minutes,
                cycles: control.snapshot().cycle_count,
                elapsed,
            };
            self.summary = Some(summary);
            info!(
                "session expired after {} min, {} cycles",
                summary.minutes,
                summary.cycles
            );
            sink.emit(&Report::Complete(summary));
        }
        self.state
    }
}
