//! Interrupt-driven waveform generator

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;
use stim_core::{Instant, StimError, StimResult, WaveformTiming};
use stim_hal::{drive, AlarmTimer, Level};

use crate::state::RuntimeState;

/// Square-wave generator owning the output pin and the alarm timer
///
/// After [`arm`](Generator::arm) the board's alarm interrupt must call
/// [`on_fire`](Generator::on_fire) on every firing. The output starts LOW, so
/// the first interval is the off phase and the first firing enters the on
/// phase. A symmetric waveform runs on a fixed auto-reload interval; an
/// asymmetric one reprograms the timer on every firing to the length of the
/// phase just entered.
pub struct Generator<P, T> {
    pin: P,
    timer: T,
    timing: WaveformTiming,
    state: RuntimeState,
    armed: bool,
}

impl<P, T> Generator<P, T>
where
    P: OutputPin<Error = Infallible>,
    T: AlarmTimer,
{
    /// Create an idle generator; the pin is not touched until armed
    pub fn new(pin: P, timer: T, timing: WaveformTiming) -> Self {
        Self {
            pin,
            timer,
            timing,
            state: RuntimeState::new(),
            armed: false,
        }
    }

    /// Drive the output low and start the alarm timer
    ///
    /// On timer failure the output stays low and the generator stays idle.
    pub fn arm(&mut self, now: Instant) -> StimResult<()> {
        if self.armed {
            return Err(StimError::AlreadyArmed);
        }
        if self.state.has_stopped() {
            return Err(StimError::SessionStopped);
        }

        drive(&mut self.pin, Level::Low);
        self.state.level = Level::Low;
        self.timer.start(self.timing.off_time().as_micros())?;

        self.armed = true;
        self.state.running = true;
        self.state.started_at = Some(now);
        Ok(())
    }

    /// Alarm interrupt handler body
    ///
    /// Flips the output and counts a cycle on every transition into HIGH.
    /// Bounded and non-blocking; a firing that arrives after
    /// [`disarm`](Generator::disarm) changes nothing.
    #[inline]
    pub fn on_fire(&mut self) -> Level {
        self.timer.clear_interrupt();
        if !self.armed {
            return self.state.level;
        }

        let level = !self.state.level;
        drive(&mut self.pin, level);
        self.state.level = level;
        if level.is_high() {
            self.state.cycle_count = self.state.cycle_count.wrapping_add(1);
        }
        if !self.timing.is_symmetric() {
            self.timer.reload(self.timing.phase(level).as_micros());
        }
        level
    }

    /// Stop further firings, leaving the output level as it is
    pub fn disarm(&mut self) {
        self.timer.stop();
        self.armed = false;
    }

    /// Stop sequence: disarm, force the output low, clear `running`
    ///
    /// Returns `true` only for the call that actually stopped a running
    /// generator; every later call is a no-op.
    pub fn halt(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.disarm();
        drive(&mut self.pin, Level::Low);
        self.state.level = Level::Low;
        self.state.running = false;
        true
    }

    /// Copy of the current runtime state
    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// Timing this generator runs at
    pub fn timing(&self) -> &WaveformTiming {
        &self.timing
    }

    /// Check if the alarm timer is currently running
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Mutable access to the output pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Mutable access to the alarm timer
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// Poll-side view of the generator
///
/// This is everything the session controller and status reporter are allowed
/// to do with the generator.
pub trait WaveformControl {
    /// Drive the output low and start toggling
    fn arm(&self, now: Instant) -> StimResult<()>;

    /// Run the stop sequence; `true` only the first time
    fn halt(&self) -> bool;

    /// Consistent copy of the runtime state
    fn snapshot(&self) -> RuntimeState;
}

impl<C: WaveformControl + ?Sized> WaveformControl for &C {
    fn arm(&self, now: Instant) -> StimResult<()> {
        (**self).arm(now)
    }

    fn halt(&self) -> bool {
        (**self).halt()
    }

    fn snapshot(&self) -> RuntimeState {
        (**self).snapshot()
    }
}

/// Generator slot shared between the alarm interrupt and the poll loop
///
/// Meant to live in a `static`:
///
/// ```ignore
/// static GENERATOR: SharedGenerator<Output<'static>, Timer<'static>> = SharedGenerator::new();
///
/// #[handler]
/// fn on_alarm() {
///     GENERATOR.on_fire();
/// }
/// ```
///
/// Every access masks interrupts for the duration of one short closure, so
/// the poll loop never observes a half-updated state and the interrupt never
/// runs in the middle of [`halt`](WaveformControl::halt).
pub struct SharedGenerator<P, T> {
    inner: Mutex<RefCell<Option<Generator<P, T>>>>,
}

impl<P, T> SharedGenerator<P, T> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<P, T> Default for SharedGenerator<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> SharedGenerator<P, T>
where
    P: OutputPin<Error = Infallible>,
    T: AlarmTimer,
{
    /// Place a generator in the slot, returning any previous one
    pub fn install(&self, generator: Generator<P, T>) -> Option<Generator<P, T>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(generator))
    }

    /// Interrupt entry point; `None` if no generator is installed
    #[inline]
    pub fn on_fire(&self) -> Option<Level> {
        critical_section::with(|cs| {
            self.inner
                .borrow_ref_mut(cs)
                .as_mut()
                .map(Generator::on_fire)
        })
    }

    /// Run `f` on the installed generator inside a critical section
    pub fn with<R>(&self, f: impl FnOnce(&mut Generator<P, T>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<P, T> WaveformControl for SharedGenerator<P, T>
where
    P: OutputPin<Error = Infallible>,
    T: AlarmTimer,
{
    fn arm(&self, now: Instant) -> StimResult<()> {
        self.with(|generator| generator.arm(now))
            .unwrap_or(Err(StimError::NotInstalled))
    }

    fn halt(&self) -> bool {
        self.with(Generator::halt).unwrap_or(false)
    }

    fn snapshot(&self) -> RuntimeState {
        self.with(|generator| generator.state()).unwrap_or_default()
    }
}
