#![no_std]
#![no_main]

//! ESP32-C3 firmware for the square-wave stimulation controller
//!
//! Toggles GPIO2 at 40 Hz from the TIMG0 alarm interrupt, reports progress on
//! the USB-serial console every 10 seconds and stops after 60 minutes. The
//! configuration is fixed at build time.

mod port;

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use esp_hal::{handler, main};
use esp_println::println;

use stim_core::{Duration, Instant, StimConfig, StimError};
use stim_engine::{Controller, Generator, SharedGenerator};

use port::{EspAlarm, EspClock, SerialSink};

esp_bootloader_esp_idf::esp_app_desc!();

const FREQUENCY_HZ: f32 = 40.0;
const DUTY_CYCLE: f32 = 0.5;
const SESSION_MINUTES: u32 = 60;
const REPORT_INTERVAL: Duration = Duration::from_secs(10);
const OUTPUT_PIN: u8 = 2;

const CONFIG: StimConfig = StimConfig::new()
    .with_waveform(FREQUENCY_HZ, DUTY_CYCLE)
    .with_session_minutes(SESSION_MINUTES)
    .with_report_interval(REPORT_INTERVAL)
    .with_output_pin(OUTPUT_PIN);

static GENERATOR: SharedGenerator<Output<'static>, EspAlarm> = SharedGenerator::new();

#[handler]
fn tg0_t0_level() {
    GENERATOR.on_fire();
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timing = match CONFIG.validate() {
        Ok(timing) => timing,
        Err(err) => fatal(err),
    };

    // Output::new drives the line low before the generator owns it
    let pin = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    let timer_group_0 = TimerGroup::new(peripherals.TIMG0);
    let alarm = EspAlarm::new(timer_group_0.timer0, tg0_t0_level);
    GENERATOR.install(Generator::new(pin, alarm, timing));

    let clock = EspClock;
    let mut controller = match Controller::new(CONFIG, &GENERATOR, SerialSink) {
        Ok(controller) => controller,
        Err(err) => fatal(err),
    };
    if let Err(err) = controller.start(Instant::now(&clock)) {
        fatal(err);
    }

    // Status lines continue after the session ends, output held low
    let mut delay = Delay::new();
    controller.run_forever(&clock, &mut delay)
}

fn fatal(err: StimError) -> ! {
    println!("FATAL: {}", err);
    log::error!("controller halted: {}", err);
    loop {
        core::hint::spin_loop();
    }
}
