//! Diagnostic channel on standard output

use std::io::{self, Write};

use stim_engine::{Report, ReportSink};

/// Writes every report to a `Write`, stdout by default
pub struct StdoutSink<W = io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    /// Report to any writer instead of stdout
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for StdoutSink<W> {
    fn emit(&mut self, report: &Report) {
        if let Err(err) = writeln!(self.out, "{}", report).and_then(|_| self.out.flush()) {
            log::warn!("report dropped: {}", err);
        }
    }
}
