//! Firmware core for a four-digit seven-segment LED clock with two buttons, an ambient light
//! sensor, and a thermistor.
//!
//! Two periodic tasks share a [`SchedulerContext`] with the main task: a 100 µs refresh that
//! multiplexes the committed digits with brightness dimming, and a 10 ms tick that debounces the
//! buttons and advances the time base. The main task runs the [`DisplayMode`] state machine.
//!
//! Everything outside the `pico1` feature is hardware-independent and tests on the host.
#![no_std]

mod display_buffer;
mod error;
mod glyph;
mod key_press;
mod main_task;
mod mode;
mod options;
mod rtc;
mod scheduler;
mod sensors;
mod settings;
mod switch;
mod ticks;

#[cfg(feature = "pico1")]
pub mod hardware;
#[cfg(feature = "pico1")]
mod never;
#[cfg(feature = "pico1")]
mod output_array;
#[cfg(feature = "pico1")]
pub mod tasks;

pub use crate::display_buffer::{
    CELL_COUNT, DECIMAL_POINT, DisplayBuffer, ROTATED_CELL, SEGMENT_COUNT, rotate_upside_down,
};
pub use crate::error::{Error, Result};
pub use crate::glyph::Glyph;
pub use crate::key_press::{
    Key, KeyPress, KeyReader, Keypad, LONG_PRESS_COUNT, LONG_PRESS_GUARD, SHORT_PRESS_GUARD,
};
pub use crate::main_task::{
    HEARTBEAT_LOW_TICKS, MainTask, Peripherals, SENSOR_PERIOD, SETTLE_TICKS,
    WATCHDOG_TIMEOUT_TICKS, Watchdog,
};
pub use crate::mode::{Action, DisplayMode, Readings, Transitions};
pub use crate::options::{ClockOptions, HourFormat, TemperatureUnit};
pub use crate::rtc::{Rtc, TimeDate, TimeField};
pub use crate::scheduler::{Frame, LIT_FRAMES, MIN_DIM_DIVISOR, RefreshCursor, SchedulerContext};
pub use crate::sensors::{SensorChannel, Sensors, dim_divisor};
pub use crate::settings::{
    ConfigStore, RECORD_WORDS, ScratchRegisters, ScratchStore, Settings, decode, encode,
};
pub use crate::switch::{PRESS_COUNT_CEILING, REBASED_PRESS_COUNT, SwitchChannel};
pub use crate::ticks::{TICK_MILLIS, TickSource, Ticks};

#[cfg(feature = "pico1")]
pub use crate::never::Never;
#[cfg(feature = "pico1")]
pub use crate::output_array::OutputArray;
