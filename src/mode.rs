//! Display modes, the button-driven transitions between them, and the edits they make.

mod render;

pub use render::Readings;

use crate::key_press::{Key, KeyPress, KeyReader};
use crate::options::ClockOptions;
use crate::rtc::{Rtc, TimeDate, TimeField};
use crate::settings::Settings;

/// What the clock is showing, and for the setting modes, whether the edited digits are blanked
/// this iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Hours and minutes with a blinking colon.
    #[default]
    Normal,
    SetHour {
        flash: bool,
    },
    SetMinute {
        flash: bool,
    },
    SetMonth {
        flash: bool,
    },
    SetDay {
        flash: bool,
    },
    Temperature,
    /// Month and day.
    Date,
    Weekday,
}

/// What a key press does in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Enter(DisplayMode),
    Increment(TimeField),
    RaiseTemperatureOffset,
}

/// One row of the mode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transitions {
    /// Taken on a short press of [`Key::Adjust`].
    pub adjust: Option<Action>,
    /// Whether a long press of [`Key::Adjust`] also takes `adjust`.
    pub adjust_on_long: bool,
    /// Entered on a short press of [`Key::Advance`].
    pub advance: DisplayMode,
    /// Whether holding both keys long resets the time of day.
    pub reset_on_double_hold: bool,
}

impl Transitions {
    const fn view(adjust: Option<Action>, advance: DisplayMode) -> Self {
        Self {
            adjust,
            adjust_on_long: false,
            advance,
            reset_on_double_hold: false,
        }
    }

    const fn edit(field: TimeField, advance: DisplayMode) -> Self {
        Self {
            adjust: Some(Action::Increment(field)),
            adjust_on_long: true,
            advance,
            reset_on_double_hold: false,
        }
    }

    const fn takes_adjust(&self, press: KeyPress) -> bool {
        match press {
            KeyPress::None => false,
            KeyPress::Short => true,
            KeyPress::Long => self.adjust_on_long,
        }
    }
}

impl DisplayMode {
    pub const SET_HOUR: Self = Self::SetHour { flash: false };
    pub const SET_MINUTE: Self = Self::SetMinute { flash: false };
    pub const SET_MONTH: Self = Self::SetMonth { flash: false };
    pub const SET_DAY: Self = Self::SetDay { flash: false };

    /// The mode table.
    #[must_use]
    pub const fn transitions(self, options: &ClockOptions) -> Transitions {
        let editing = options.set_date_time;
        match self {
            Self::Normal => Transitions {
                reset_on_double_hold: true,
                ..Transitions::view(
                    if editing {
                        Some(Action::Enter(Self::SET_HOUR))
                    } else {
                        None
                    },
                    Self::Temperature,
                )
            },
            Self::SetHour { .. } => Transitions::edit(TimeField::Hour, Self::SET_MINUTE),
            Self::SetMinute { .. } => Transitions::edit(TimeField::Minute, Self::Normal),
            Self::SetMonth { .. } => Transitions::edit(TimeField::Month, Self::SET_DAY),
            Self::SetDay { .. } => Transitions::edit(TimeField::Day, Self::Date),
            Self::Temperature => {
                Transitions::view(Some(Action::RaiseTemperatureOffset), Self::Date)
            }
            Self::Date => Transitions::view(
                if editing {
                    Some(Action::Enter(Self::SET_MONTH))
                } else {
                    None
                },
                Self::Weekday,
            ),
            Self::Weekday => Transitions::view(
                if editing {
                    Some(Action::Increment(TimeField::Weekday))
                } else {
                    None
                },
                Self::Normal,
            ),
        }
    }

    /// The blink flag of a setting mode.
    #[must_use]
    pub const fn flash(self) -> Option<bool> {
        match self {
            Self::SetHour { flash }
            | Self::SetMinute { flash }
            | Self::SetMonth { flash }
            | Self::SetDay { flash } => Some(flash),
            Self::Normal | Self::Temperature | Self::Date | Self::Weekday => None,
        }
    }

    #[must_use]
    const fn with_flash_toggled(self) -> Self {
        match self {
            Self::SetHour { flash } => Self::SetHour { flash: !flash },
            Self::SetMinute { flash } => Self::SetMinute { flash: !flash },
            Self::SetMonth { flash } => Self::SetMonth { flash: !flash },
            Self::SetDay { flash } => Self::SetDay { flash: !flash },
            Self::Normal | Self::Temperature | Self::Date | Self::Weekday => self,
        }
    }

    /// The decision step: reads the keys, applies any edit, and returns the next mode.
    ///
    /// A setting mode first toggles its blink flag and ignores the keys while the edited digits
    /// are blanked. Adjust is read before advance, so a press of each in one iteration applies
    /// the edit and then moves on.
    ///
    /// Clock edits go to `rtc` and to `time`, this iteration's snapshot, so the render that
    /// follows shows the new value.
    pub fn decide<K, R>(
        self,
        options: &ClockOptions,
        keys: &mut K,
        rtc: &mut R,
        time: &mut TimeDate,
        settings: &mut Settings,
    ) -> Self
    where
        K: KeyReader + ?Sized,
        R: Rtc + ?Sized,
    {
        let mode = self.with_flash_toggled();
        if mode.flash() == Some(true) {
            return mode;
        }

        let transitions = mode.transitions(options);
        let adjust = if transitions.adjust.is_some() || transitions.reset_on_double_hold {
            keys.read(Key::Adjust)
        } else {
            KeyPress::None
        };
        let advance = keys.read(Key::Advance);

        if transitions.reset_on_double_hold && adjust == KeyPress::Long && advance == KeyPress::Long
        {
            #[cfg(feature = "defmt")]
            defmt::info!("Both keys held: resetting time of day");
            rtc.reset_to_zero();
            time.reset_to_zero();
            return mode;
        }

        let mut next = mode;
        if let Some(action) = transitions.adjust {
            if transitions.takes_adjust(adjust) {
                next = action.apply(mode, rtc, time, settings);
            }
        }
        if advance == KeyPress::Short {
            next = transitions.advance;
        }

        #[cfg(feature = "defmt")]
        if next != mode {
            defmt::info!("Mode: {} -> {}", mode, next);
        }
        next
    }
}

impl Action {
    fn apply<R: Rtc + ?Sized>(
        self,
        mode: DisplayMode,
        rtc: &mut R,
        time: &mut TimeDate,
        settings: &mut Settings,
    ) -> DisplayMode {
        match self {
            Self::Enter(next) => next,
            Self::Increment(field) => {
                match field {
                    TimeField::Hour => rtc.increment_hour(),
                    TimeField::Minute => rtc.increment_minute(),
                    TimeField::Month => rtc.increment_month(),
                    TimeField::Day => rtc.increment_day(),
                    TimeField::Weekday => rtc.increment_weekday(),
                }
                time.increment(field);
                mode
            }
            Self::RaiseTemperatureOffset => {
                settings.raise_temperature_offset();
                mode
            }
        }
    }
}
