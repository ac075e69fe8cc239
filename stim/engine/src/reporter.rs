//! Periodic status reporter

use stim_core::{Duration, Instant};

use crate::generator::WaveformControl;
use crate::report::{Report, ReportSink, StatusLine};

/// Emits a [`StatusLine`] every `interval`
///
/// Purely observational: it only ever reads a snapshot of the runtime state.
/// Report times advance in whole intervals from the start, so a slow poll
/// loop does not make the schedule drift; if the loop falls more than a full
/// interval behind, the schedule restarts from the late report.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    interval: Duration,
    started_at: Instant,
    last_report: Instant,
}

impl StatusReporter {
    /// Create a reporter with the given cadence
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            started_at: Instant::ZERO,
            last_report: Instant::ZERO,
        }
    }

    /// Record the start of the session; the first report is one interval later
    pub fn initialize(&mut self, now: Instant) {
        self.started_at = now;
        self.last_report = now;
    }

    /// Report cadence
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Build the status line for `now` without emitting it
    pub fn status_at<C: WaveformControl + ?Sized>(&self, now: Instant, control: &C) -> StatusLine {
        let cycles = control.snapshot().cycle_count;
        StatusLine::new(now.elapsed_since(self.started_at), cycles)
    }

    /// One poll pass; emits and returns a line when an interval has passed
    pub fn poll<C, S>(&mut self, now: Instant, control: &C, sink: &mut S) -> Option<StatusLine>
    where
        C: WaveformControl + ?Sized,
        S: ReportSink + ?Sized,
    {
        if now.elapsed_since(self.last_report) < self.interval {
            return None;
        }

        self.last_report = self.last_report + self.interval;
        if now.elapsed_since(self.last_report) >= self.interval {
            self.last_report = now;
        }

        let line = self.status_at(now, control);
        debug!("status report: {} cycles", line.cycles);
        sink.emit(&Report::Status(line));
        Some(line)
    }
}
