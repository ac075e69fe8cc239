use std::string::ToString;

use stim_core::{Duration, Instant};

use super::{shared, RecordingSink};
use crate::generator::WaveformControl;
use crate::report::{measured_frequency, Report, SessionSummary, StatusLine};
use crate::reporter::StatusReporter;

const TEN_SECONDS_US: u64 = 10_000_000;

#[test]
fn test_measured_frequency() {
    assert_eq!(measured_frequency(400, Duration::from_secs(10)), 40.0);
    assert_eq!(measured_frequency(0, Duration::from_secs(10)), 0.0);
    assert_eq!(measured_frequency(20, Duration::from_millis(500)), 40.0);
}

#[test]
fn test_zero_elapsed_reports_zero_hz() {
    assert_eq!(measured_frequency(0, Duration::ZERO), 0.0);
    assert_eq!(measured_frequency(17, Duration::ZERO), 0.0);

    let line = StatusLine::new(Duration::ZERO, 17);
    assert_eq!(line.measured_hz, 0.0);
    assert_eq!(line.to_string(), "[00:00] Cycles: 17  (0.0 Hz actual)");
}

#[test]
fn test_first_report_after_one_interval() {
    let control = shared(40.0, 0.5);
    control.arm(Instant::ZERO).unwrap();

    let mut reporter = StatusReporter::new(Duration::from_secs(10));
    reporter.initialize(Instant::ZERO);
    let mut sink = RecordingSink::default();

    assert!(reporter
        .poll(Instant::from_micros(TEN_SECONDS_US - 1), &control, &mut sink)
        .is_none());
    assert!(sink.reports.is_empty());

    for _ in 0..800 {
        control.on_fire();
    }
    let line = reporter
        .poll(Instant::from_micros(TEN_SECONDS_US), &control, &mut sink)
        .unwrap();
    assert_eq!(line.cycles, 400);
    assert_eq!(line.measured_hz, 40.0);
    assert_eq!(line.to_string(), "[00:10] Cycles: 400  (40.0 Hz actual)");
    assert_eq!(sink.reports, [Report::Status(line)]);
}

#[test]
fn test_schedule_does_not_drift() {
    let control = shared(40.0, 0.5);
    control.arm(Instant::ZERO).unwrap();

    let mut reporter = StatusReporter::new(Duration::from_secs(10));
    reporter.initialize(Instant::ZERO);
    let mut sink = RecordingSink::default();

    // Poll every 100 ms with 30 ms of lateness on each report
    let mut now = 0u64;
    while now <= 60 * 1_000_000 {
        reporter.poll(Instant::from_micros(now + 30_000), &control, &mut sink);
        now += 100_000;
    }
    assert_eq!(sink.statuses(), 6);
}

#[test]
fn test_late_poll_emits_one_report() {
    let control = shared(40.0, 0.5);
    control.arm(Instant::ZERO).unwrap();

    let mut reporter = StatusReporter::new(Duration::from_secs(10));
    reporter.initialize(Instant::ZERO);
    let mut sink = RecordingSink::default();

    assert!(reporter
        .poll(Instant::from_micros(35 * 1_000_000), &control, &mut sink)
        .is_some());
    assert!(reporter
        .poll(Instant::from_micros(36 * 1_000_000), &control, &mut sink)
        .is_none());
    assert!(reporter
        .poll(Instant::from_micros(45 * 1_000_000), &control, &mut sink)
        .is_some());
    assert_eq!(sink.statuses(), 2);
}

#[test]
fn test_reporter_is_read_only() {
    let control = shared(40.0, 0.25);
    control.arm(Instant::ZERO).unwrap();
    control.on_fire();

    let before = control.snapshot();
    let mut reporter = StatusReporter::new(Duration::from_secs(1));
    reporter.initialize(Instant::ZERO);
    let mut sink = RecordingSink::default();
    reporter.poll(Instant::from_micros(2_000_000), &control, &mut sink);

    assert_eq!(control.snapshot(), before);
    control.with(|gen| assert_eq!(gen.pin_mut().history.len(), 2));
}

#[test]
fn test_status_line_formatting() {
    let line = StatusLine::new(Duration::from_secs(59 * 60 + 7), 141_880);
    assert_eq!(line.minutes(), 59);
    assert_eq!(line.seconds(), 7);
    assert!(line.to_string().starts_with("[59:07] Cycles: 141880"));

    let long = StatusLine::new(Duration::from_secs(125 * 60), 0);
    assert_eq!(long.minutes(), 125);
    assert!(long.to_string().starts_with("[125:00]"));
}

#[test]
fn test_summary_formatting() {
    let summary = SessionSummary {
        minutes: 60,
        cycles: 144_000,
        elapsed: Duration::from_minutes(60),
    };
    let text = summary.to_string();
    assert!(text.contains("Session complete: 60 minutes"));
    assert!(text.contains("Total cycles: 144000"));
}

#[test]
fn test_cycle_count_beyond_u32() {
    // 500 kHz for 10000 s overflows a 32-bit counter
    let cycles = 5_000_000_000u64;
    assert!(cycles > u64::from(u32::MAX));
    assert_eq!(measured_frequency(cycles, Duration::from_secs(10_000)), 500_000.0);

    let line = StatusLine::new(Duration::from_secs(10_000), cycles);
    assert_eq!(line.minutes(), 166);
    assert_eq!(line.seconds(), 40);
    assert_eq!(
        line.to_string(),
        "[166:40] Cycles: 5000000000  (500000.0 Hz actual)"
    );
}
