//! Turning a switch's press count into a discrete key press.

use crate::scheduler::SchedulerContext;
use crate::ticks::{TickSource, Ticks};

/// Press counts above this are long presses (about 1.5 s of holding).
pub const LONG_PRESS_COUNT: u8 = 150;

/// Wait after a short press (about 600 ms), long enough for an ordinary press to be released
/// before the keys are read again.
pub const SHORT_PRESS_GUARD: Ticks = 60;

/// Wait after a long press (about 300 ms). A held key repeats at this pace.
pub const LONG_PRESS_GUARD: Ticks = 30;

/// The clock's two buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Changes the value or setting shown.
    Adjust,
    /// Moves on to the next mode.
    Advance,
}

// Instead of an integer count, main-task logic only ever sees one of three presses.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyPress {
    #[default]
    None,
    Short,
    Long,
}

// Make `KeyPress` solely responsible for the distinction in press count between a short and a
// long press.
impl From<u8> for KeyPress {
    fn from(press_count: u8) -> Self {
        match press_count {
            0 => Self::None,
            count if count > LONG_PRESS_COUNT => Self::Long,
            _ => Self::Short,
        }
    }
}

impl KeyPress {
    /// How long to wait after reading this press.
    #[must_use]
    pub const fn guard_delay(self) -> Ticks {
        match self {
            Self::None => 0,
            Self::Short => SHORT_PRESS_GUARD,
            Self::Long => LONG_PRESS_GUARD,
        }
    }

    #[must_use]
    pub const fn is_pressed(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A source of classified key presses for the mode state machine.
pub trait KeyReader {
    fn read(&mut self, key: Key) -> KeyPress;
}

/// Reads the debounced switches of a [`SchedulerContext`].
///
/// Each press found is followed by a blocking guard delay, which keeps a release from being read
/// as a second press without tracking release edges.
pub struct Keypad<'a, T: TickSource + ?Sized> {
    context: &'a SchedulerContext,
    ticks: &'a T,
}

impl<'a, T: TickSource + ?Sized> Keypad<'a, T> {
    #[must_use]
    pub const fn new(context: &'a SchedulerContext, ticks: &'a T) -> Self {
        Self { context, ticks }
    }
}

impl<T: TickSource + ?Sized> KeyReader for Keypad<'_, T> {
    fn read(&mut self, key: Key) -> KeyPress {
        let press = KeyPress::from(self.context.switch(key).press_count());
        if press.is_pressed() {
            self.ticks.delay(press.guard_delay());
        }
        press
    }
}
