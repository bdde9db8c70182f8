//! RP2040 pin assignments and the peripheral adapters behind the core's traits.

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{self, Level, Pull};
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{self, DateTime, DayOfWeek};
use embassy_rp::watchdog;
use embassy_time::Duration;

use crate::display_buffer::{CELL_COUNT, SEGMENT_COUNT};
use crate::main_task::{WATCHDOG_TIMEOUT_TICKS, Watchdog};
use crate::output_array::OutputArray;
use crate::rtc::{Rtc, TimeDate, TimeField};
use crate::sensors::{SensorChannel, Sensors};
use crate::settings::ScratchRegisters;
use crate::ticks::TICK_MILLIS;

pub struct Hardware {
    /// Digit enables, left to right. Low enables a digit.
    pub cells: OutputArray<'static, CELL_COUNT>,
    /// Segments A–G and the decimal point. High lights a segment.
    pub segments: OutputArray<'static, SEGMENT_COUNT>,
    pub adjust: gpio::Input<'static>,
    pub advance: gpio::Input<'static>,
    pub heartbeat: gpio::Output<'static>,
    pub sensors: AdcSensors,
    pub rtc: RpRtc,
    pub supervisor: Supervisor,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cells = OutputArray::new([
            gpio::Output::new(peripherals.PIN_1, Level::High),
            gpio::Output::new(peripherals.PIN_2, Level::High),
            gpio::Output::new(peripherals.PIN_3, Level::High),
            gpio::Output::new(peripherals.PIN_4, Level::High),
        ]);

        let segments = OutputArray::new([
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
            gpio::Output::new(peripherals.PIN_8, Level::Low),
            gpio::Output::new(peripherals.PIN_9, Level::Low),
            gpio::Output::new(peripherals.PIN_10, Level::Low),
            gpio::Output::new(peripherals.PIN_11, Level::Low),
            gpio::Output::new(peripherals.PIN_12, Level::Low),
        ]);

        // Buttons short to ground.
        let adjust = gpio::Input::new(peripherals.PIN_13, Pull::Up);
        let advance = gpio::Input::new(peripherals.PIN_14, Pull::Up);

        let heartbeat = gpio::Output::new(peripherals.PIN_0, Level::High);

        let sensors = AdcSensors {
            adc: Adc::new_blocking(peripherals.ADC, adc::Config::default()),
            light: adc::Channel::new_pin(peripherals.PIN_26, Pull::None),
            thermistor: adc::Channel::new_pin(peripherals.PIN_27, Pull::None),
        };

        let rtc = RpRtc {
            inner: rtc::Rtc::new(peripherals.RTC),
            last: TimeDate::default(),
        };

        let supervisor = Supervisor::new(watchdog::Watchdog::new(peripherals.WATCHDOG));

        Self {
            cells,
            segments,
            adjust,
            advance,
            heartbeat,
            sensors,
            rtc,
            supervisor,
        }
    }
}

/// The light and thermistor dividers on the ADC.
pub struct AdcSensors {
    adc: Adc<'static, adc::Blocking>,
    light: adc::Channel<'static>,
    thermistor: adc::Channel<'static>,
}

impl Sensors for AdcSensors {
    fn sample(&mut self, channel: SensorChannel) -> u16 {
        let channel = match channel {
            SensorChannel::Light => &mut self.light,
            SensorChannel::Thermistor => &mut self.thermistor,
        };
        // The RP2040 ADC is 12-bit; the conversions expect 10.
        match self.adc.blocking_read(channel) {
            Ok(raw) => raw >> 2,
            Err(_err) => {
                defmt::warn!("ADC read failed: {}", defmt::Debug2Format(&_err));
                0
            }
        }
    }
}

/// The RP2040's on-chip real-time clock.
pub struct RpRtc {
    inner: rtc::Rtc<'static, RTC>,
    /// Returned when a read fails.
    last: TimeDate,
}

/// Where a clock that was never set starts: Saturday 2000-01-01 00:00:00.
const EPOCH: DateTime = DateTime {
    year: 2000,
    month: 1,
    day: 1,
    day_of_week: DayOfWeek::Saturday,
    hour: 0,
    minute: 0,
    second: 0,
};

impl RpRtc {
    fn read(&self) -> Option<DateTime> {
        match self.inner.now() {
            Ok(date_time) => Some(date_time),
            Err(_err) => {
                defmt::warn!("RTC read failed: {}", defmt::Debug2Format(&_err));
                None
            }
        }
    }

    fn write(&mut self, date_time: DateTime) {
        if let Err(_err) = self.inner.set_datetime(date_time) {
            defmt::warn!("RTC write failed: {}", defmt::Debug2Format(&_err));
        }
    }

    /// Reads, edits, and writes back the clock.
    fn modify(&mut self, edit: impl FnOnce(&mut TimeDate)) {
        if let Some(date_time) = self.read() {
            let mut time = time_date(&date_time);
            edit(&mut time);
            self.write(DateTime {
                year: date_time.year,
                month: time.month,
                day: time.day,
                day_of_week: day_of_week(time.weekday),
                hour: time.hour,
                minute: time.minute,
                second: time.second,
            });
        }
    }
}

impl Rtc for RpRtc {
    fn init(&mut self) {
        if !self.inner.is_running() {
            defmt::info!("RTC not running; starting from the epoch");
            self.write(EPOCH);
        }
    }

    fn snapshot(&mut self) -> TimeDate {
        if let Some(date_time) = self.read() {
            self.last = time_date(&date_time);
        }
        self.last
    }

    fn increment(&mut self, field: TimeField) {
        self.modify(|time| time.increment(field));
    }

    fn reset_to_zero(&mut self) {
        self.modify(TimeDate::reset_to_zero);
    }
}

const fn time_date(date_time: &DateTime) -> TimeDate {
    TimeDate {
        hour: date_time.hour,
        minute: date_time.minute,
        second: date_time.second,
        month: date_time.month,
        day: date_time.day,
        weekday: weekday(date_time.day_of_week),
    }
}

/// Monday is 1, Sunday is 7.
const fn weekday(day_of_week: DayOfWeek) -> u8 {
    match day_of_week {
        DayOfWeek::Monday => 1,
        DayOfWeek::Tuesday => 2,
        DayOfWeek::Wednesday => 3,
        DayOfWeek::Thursday => 4,
        DayOfWeek::Friday => 5,
        DayOfWeek::Saturday => 6,
        DayOfWeek::Sunday => 7,
    }
}

const fn day_of_week(weekday: u8) -> DayOfWeek {
    match weekday {
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        6 => DayOfWeek::Saturday,
        _ => DayOfWeek::Sunday,
    }
}

/// The hardware watchdog. Its scratch registers survive a watchdog reset and hold the settings.
pub struct Supervisor(watchdog::Watchdog);

impl Supervisor {
    /// Starts the watchdog with the main task's timeout.
    #[must_use]
    pub fn new(mut watchdog: watchdog::Watchdog) -> Self {
        watchdog.pause_on_debug(true);
        watchdog.start(Duration::from_millis(
            u64::from(WATCHDOG_TIMEOUT_TICKS).saturating_mul(TICK_MILLIS),
        ));
        Self(watchdog)
    }
}

impl Watchdog for Supervisor {
    fn feed(&mut self) {
        self.0.feed();
    }
}

impl ScratchRegisters for Supervisor {
    fn read_scratch(&mut self, index: usize) -> u32 {
        self.0.get_scratch(index)
    }

    fn write_scratch(&mut self, index: usize, value: u32) {
        self.0.set_scratch(index, value);
    }
}
