//! Time type tests for stim-core

use stim_core::{Duration, Instant};

#[test]
fn test_duration_units() {
    assert_eq!(Duration::from_millis(100).as_micros(), 100_000);
    assert_eq!(Duration::from_secs(10).as_micros(), 10_000_000);
    assert_eq!(Duration::from_minutes(1).as_micros(), 60_000_000);
    assert_eq!(Duration::from_micros(61_500_000).as_secs(), 61);
    assert_eq!(Duration::from_micros(1_500).as_millis(), 1);
}

#[test]
fn test_duration_secs_f32() {
    assert_eq!(Duration::from_secs(10).as_secs_f32(), 10.0);
    assert_eq!(Duration::from_millis(500).as_secs_f32(), 0.5);
    assert_eq!(Duration::ZERO.as_secs_f32(), 0.0);
}

#[test]
fn test_duration_saturates() {
    assert_eq!(Duration::from_secs(u64::MAX), Duration::MAX);
    assert_eq!(Duration::MAX + Duration::from_micros(1), Duration::MAX);
    assert_eq!(
        Duration::from_micros(5).saturating_sub(Duration::from_micros(10)),
        Duration::ZERO
    );
}

#[test]
fn test_instant_elapsed() {
    let start = Instant::from_micros(1_000);
    let later = start + Duration::from_secs(2);
    assert_eq!(later.elapsed_since(start), Duration::from_micros(2_000_000));
    assert_eq!(later - start, Duration::from_secs(2));
}

#[test]
fn test_instant_wraparound() {
    let start = Instant::from_micros(u64::MAX - 9);
    let later = start + Duration::from_micros(20);
    assert_eq!(later.as_micros(), 10);
    assert_eq!(later.elapsed_since(start), Duration::from_micros(20));
}

#[test]
fn test_instant_now_reads_clock() {
    struct FixedClock(u64);

    impl stim_hal::MonotonicClock for FixedClock {
        fn now_us(&self) -> u64 {
            self.0
        }
    }

    let clock = FixedClock(42_000);
    assert_eq!(Instant::now(&clock), Instant::from_micros(42_000));
}
