//! Run a stimulation session on the host
//!
//! The alarm is a host thread and the output line is simulated; everything
//! else is the same engine the firmware runs. Reports go to stdout, engine
//! log records to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use stim_core::{Duration, Instant, StimConfig};
use stim_engine::{Controller, Generator, SharedGenerator};
use stim_port_posix::{SimPin, StdClock, StdDelay, StdoutSink, ThreadAlarm};

static GENERATOR: SharedGenerator<SimPin, ThreadAlarm> = SharedGenerator::new();

fn on_alarm() {
    GENERATOR.on_fire();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Square-wave stimulation controller, host simulation")]
struct Opts {
    /// Output frequency in Hz
    #[arg(short, long, default_value_t = 40.0)]
    frequency: f32,

    /// Fraction of each period spent HIGH, in (0, 1]
    #[arg(short, long, default_value_t = 0.5)]
    duty: f32,

    /// Session length in minutes, 0 runs until interrupted
    #[arg(short, long = "session-minutes", default_value_t = 60)]
    session_minutes: u32,

    /// Seconds between status reports
    #[arg(long = "report-interval", default_value_t = 10)]
    report_interval: u64,

    /// Milliseconds between poll-loop passes
    #[arg(long = "poll-interval-ms", default_value_t = 100)]
    poll_interval_ms: u64,

    /// Output pin number shown in the banner
    #[arg(long, default_value_t = 2)]
    pin: u8,

    /// Log engine events at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Opts {
    fn config(&self) -> StimConfig {
        StimConfig::new()
            .with_waveform(self.frequency, self.duty)
            .with_session_minutes(self.session_minutes)
            .with_report_interval(Duration::from_secs(self.report_interval))
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_output_pin(self.pin)
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level = if opts.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = opts.config();
    let timing = config.validate().context("invalid configuration")?;
    GENERATOR.install(Generator::new(SimPin::new(), ThreadAlarm::new(on_alarm), timing));

    let clock = StdClock::new();
    let mut controller = Controller::new(config, &GENERATOR, StdoutSink::new())?;
    controller
        .start(Instant::now(&clock))
        .context("failed to arm the generator")?;

    let summary = controller.run_session(&clock, &mut StdDelay);

    let edges = GENERATOR
        .with(|generator| generator.pin_mut().rising_edges())
        .unwrap_or_default();
    tracing::info!(
        cycles = summary.cycles,
        rising_edges = edges,
        elapsed_us = summary.elapsed.as_micros(),
        "session finished"
    );
    Ok(())
}
