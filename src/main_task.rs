//! The cooperative main task: one fixed-cadence iteration after another.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::display_buffer::DisplayBuffer;
use crate::key_press::Keypad;
use crate::mode::{DisplayMode, Readings};
use crate::options::ClockOptions;
use crate::rtc::Rtc;
use crate::scheduler::SchedulerContext;
use crate::sensors::{SensorChannel, Sensors, dim_divisor};
use crate::settings::{ConfigStore, ScratchRegisters, ScratchStore, Settings};
use crate::ticks::{TickSource, Ticks};

/// How long the heartbeat output is held low at the start of each iteration.
pub const HEARTBEAT_LOW_TICKS: Ticks = 6;

/// Wait at the end of each iteration, after the settings are written.
pub const SETTLE_TICKS: Ticks = 4;

/// The sensors are sampled on every this-many-th iteration (about once a second).
pub const SENSOR_PERIOD: u16 = 4;

/// The watchdog resets the device unless fed within this many ticks (2 s).
///
/// The slowest iteration reads two short presses: heartbeat, two short-press guards, and the
/// settle wait, each plus one tick for the clock read that starts it.
pub const WATCHDOG_TIMEOUT_TICKS: u32 = 200;

/// The hardware watchdog.
pub trait Watchdog {
    fn feed(&mut self);
}

impl<S: ScratchRegisters + Watchdog> Watchdog for ScratchStore<S> {
    fn feed(&mut self) {
        self.registers_mut().feed();
    }
}

/// The collaborators the main task drives.
pub struct Peripherals<R, A, S, H> {
    pub rtc: R,
    pub sensors: A,
    /// The settings store. Also services the watchdog, whose scratch registers hold the settings
    /// on the RP2040.
    pub store: S,
    /// Pulsed low once per iteration to show the loop is alive.
    pub heartbeat: H,
}

/// The main task and the state it alone owns: mode, settings, and the latest readings.
pub struct MainTask<'a, T: ?Sized, R, A, S, H> {
    context: &'a SchedulerContext,
    ticks: &'a T,
    options: ClockOptions,
    peripherals: Peripherals<R, A, S, H>,
    mode: DisplayMode,
    settings: Settings,
    temperature: i16,
    iteration: u16,
}

impl<'a, T, R, A, S, H> MainTask<'a, T, R, A, S, H>
where
    T: TickSource + ?Sized,
    R: Rtc,
    A: Sensors,
    S: ConfigStore + Watchdog,
    H: OutputPin<Error = Infallible>,
{
    /// Starts the RTC and loads the stored settings.
    ///
    /// `ticks` is the time base; on the device it is `context` itself.
    pub fn new(
        context: &'a SchedulerContext,
        ticks: &'a T,
        options: ClockOptions,
        mut peripherals: Peripherals<R, A, S, H>,
    ) -> Self {
        peripherals.rtc.init();
        let settings = peripherals.store.load();
        #[cfg(feature = "defmt")]
        defmt::info!("Starting with {}, {}", options, settings);
        Self {
            context,
            ticks,
            options,
            peripherals,
            mode: DisplayMode::default(),
            settings,
            temperature: 0,
            iteration: 0,
        }
    }

    /// Runs iterations forever.
    pub fn run(mut self) -> ! {
        loop {
            self.iterate();
        }
    }

    /// One iteration: heartbeat, sensors, RTC, decide, render, commit, persist, settle, watchdog.
    ///
    /// Returns the buffer committed to the refresh scheduler.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Remainder by a non-zero constant"
    )]
    pub fn iterate(&mut self) -> DisplayBuffer {
        let Ok(()) = self.peripherals.heartbeat.set_low();
        self.ticks.delay(HEARTBEAT_LOW_TICKS);
        let Ok(()) = self.peripherals.heartbeat.set_high();

        if self.iteration % SENSOR_PERIOD == 0 {
            self.sample_sensors();
        }

        let mut time = self.peripherals.rtc.snapshot();

        let mut keys = Keypad::new(self.context, self.ticks);
        self.mode = self.mode.decide(
            &self.options,
            &mut keys,
            &mut self.peripherals.rtc,
            &mut time,
            &mut self.settings,
        );

        let readings = Readings {
            time,
            temperature: self.temperature,
            iteration: self.iteration,
        };
        let committed = self.mode.render(&readings, &self.options).wiring_corrected();
        self.context.commit(&committed);

        self.peripherals.store.write(&self.settings);
        self.ticks.delay(SETTLE_TICKS);
        self.iteration = self.iteration.wrapping_add(1);
        self.peripherals.store.feed();
        committed
    }

    fn sample_sensors(&mut self) {
        let light = self.peripherals.sensors.sample(SensorChannel::Light);
        self.context.set_dim_divisor(dim_divisor(light));

        let raw = self.peripherals.sensors.sample(SensorChannel::Thermistor);
        self.temperature = self
            .options
            .temperature_unit
            .degrees(raw)
            .saturating_add(i16::from(self.settings.temperature_offset));
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The calibrated temperature from the last sensor pass.
    #[must_use]
    pub const fn temperature(&self) -> i16 {
        self.temperature
    }

    #[must_use]
    pub const fn iteration(&self) -> u16 {
        self.iteration
    }

    #[must_use]
    pub const fn peripherals(&self) -> &Peripherals<R, A, S, H> {
        &self.peripherals
    }
}
