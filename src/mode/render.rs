//! The render step: a mode plus the iteration's readings become a pending display buffer.

use super::DisplayMode;
use crate::display_buffer::DisplayBuffer;
use crate::glyph::Glyph;
use crate::options::{ClockOptions, HourFormat};
use crate::rtc::TimeDate;

/// Iterations in one colon blink period, and how many of them the colon is lit.
const COLON_PERIOD: u16 = 10;
const COLON_LIT: u16 = 4;

/// The readings one iteration renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    pub time: TimeDate,
    /// Calibrated temperature, whole degrees.
    pub temperature: i16,
    /// The main task's iteration counter, which paces the colon blink.
    pub iteration: u16,
}

impl DisplayMode {
    /// Renders this mode into a fresh buffer, before wiring correction.
    #[must_use]
    pub fn render(self, readings: &Readings, options: &ClockOptions) -> DisplayBuffer {
        match self {
            Self::Normal | Self::SetHour { .. } | Self::SetMinute { .. } => {
                self.render_time(readings, options)
            }
            Self::Date | Self::SetMonth { .. } | Self::SetDay { .. } => self.render_date(&readings.time),
            Self::Weekday => Self::render_weekday(&readings.time),
            Self::Temperature => Self::render_temperature(readings.temperature, options),
        }
    }

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Remainder by a non-zero constant"
    )]
    fn render_time(self, readings: &Readings, options: &ClockOptions) -> DisplayBuffer {
        let colon = match self {
            Self::Normal => readings.iteration % COLON_PERIOD < COLON_LIT,
            _ => true,
        };
        let (hour, pm) = match options.hour_format {
            HourFormat::TwentyFour => (readings.time.hour, false),
            HourFormat::Twelve => readings.time.hour_12(),
        };
        let (mut tens_hour, ones_hour) = Glyph::pair(hour);
        if options.hour_format == HourFormat::Twelve && tens_hour == Glyph::Digit(0) {
            tens_hour = Glyph::Blank;
        }
        let hours = blank_if(
            self == (Self::SetHour { flash: true }),
            (tens_hour, ones_hour),
        );
        let minutes = blank_if(
            self == (Self::SetMinute { flash: true }),
            Glyph::pair(readings.time.minute),
        );

        DisplayBuffer::from_glyphs([
            (hours.0, false),
            (hours.1, colon),
            (minutes.0, colon),
            (minutes.1, pm),
        ])
    }

    fn render_date(self, time: &TimeDate) -> DisplayBuffer {
        let month = blank_if(
            self == (Self::SetMonth { flash: true }),
            Glyph::pair(time.month),
        );
        let day = blank_if(
            self == (Self::SetDay { flash: true }),
            Glyph::pair(time.day),
        );
        DisplayBuffer::from_glyphs([
            (month.0, false),
            (month.1, true),
            (day.0, false),
            (day.1, false),
        ])
    }

    fn render_weekday(time: &TimeDate) -> DisplayBuffer {
        DisplayBuffer::from_glyphs([
            (Glyph::Blank, false),
            (Glyph::Dash, false),
            (Glyph::Digit(time.weekday), false),
            (Glyph::Dash, false),
        ])
    }

    fn render_temperature(temperature: i16, options: &ClockOptions) -> DisplayBuffer {
        let magnitude = u8::try_from(temperature.unsigned_abs().min(99)).unwrap_or(99);
        let (tens, ones) = Glyph::pair(magnitude);
        let sign = if temperature > 0 {
            Glyph::Blank
        } else {
            Glyph::Dash
        };
        DisplayBuffer::from_glyphs([
            (tens, false),
            (ones, false),
            (options.temperature_unit.glyph(), true),
            (sign, false),
        ])
    }
}

const fn blank_if(blank: bool, pair: (Glyph, Glyph)) -> (Glyph, Glyph) {
    if blank { (Glyph::Blank, Glyph::Blank) } else { pair }
}

#[cfg(test)]
mod tests {
    use super::Readings;
    use crate::display_buffer::{DECIMAL_POINT, DisplayBuffer};
    use crate::glyph::Glyph;
    use crate::mode::DisplayMode;
    use crate::options::{ClockOptions, HourFormat, TemperatureUnit};
    use crate::rtc::TimeDate;

    const H24: ClockOptions = ClockOptions {
        hour_format: HourFormat::TwentyFour,
        temperature_unit: TemperatureUnit::Celsius,
        set_date_time: true,
    };
    const H12: ClockOptions = ClockOptions {
        hour_format: HourFormat::Twelve,
        ..H24
    };

    const fn readings(hour: u8, minute: u8, iteration: u16) -> Readings {
        Readings {
            time: TimeDate {
                hour,
                minute,
                second: 0,
                month: 7,
                day: 4,
                weekday: 3,
            },
            temperature: 21,
            iteration,
        }
    }

    fn digits(cells: [(Glyph, bool); 4]) -> DisplayBuffer {
        DisplayBuffer::from_glyphs(cells)
    }

    #[test]
    fn colon_blinks_with_the_iteration_count() {
        let lit = DisplayMode::Normal.render(&readings(9, 5, 13), &H24);
        let dark = DisplayMode::Normal.render(&readings(9, 5, 14), &H24);
        assert_eq!(lit.cell(1) & DECIMAL_POINT, DECIMAL_POINT);
        assert_eq!(lit.cell(2) & DECIMAL_POINT, DECIMAL_POINT);
        assert_eq!(dark.cell(1) & DECIMAL_POINT, 0);
        assert_eq!(dark.cell(2) & DECIMAL_POINT, 0);
    }

    #[test]
    fn twenty_four_hour_keeps_leading_zero() {
        assert_eq!(
            DisplayMode::Normal.render(&readings(9, 5, 5), &H24),
            digits([
                (Glyph::Digit(0), false),
                (Glyph::Digit(9), false),
                (Glyph::Digit(0), false),
                (Glyph::Digit(5), false),
            ])
        );
    }

    #[test]
    fn twelve_hour_blanks_leading_zero_and_shows_pm() {
        assert_eq!(
            DisplayMode::Normal.render(&readings(21, 30, 5), &H12),
            digits([
                (Glyph::Blank, false),
                (Glyph::Digit(9), false),
                (Glyph::Digit(3), false),
                (Glyph::Digit(0), true),
            ])
        );
        assert_eq!(
            DisplayMode::Normal.render(&readings(0, 0, 5), &H12),
            digits([
                (Glyph::Digit(1), false),
                (Glyph::Digit(2), false),
                (Glyph::Digit(0), false),
                (Glyph::Digit(0), false),
            ])
        );
    }

    #[test]
    fn setting_hours_blanks_hours_and_forces_colon() {
        assert_eq!(
            DisplayMode::SetHour { flash: true }.render(&readings(13, 45, 5), &H24),
            digits([
                (Glyph::Blank, false),
                (Glyph::Blank, true),
                (Glyph::Digit(4), true),
                (Glyph::Digit(5), false),
            ])
        );
        assert_eq!(
            DisplayMode::SetHour { flash: false }.render(&readings(13, 45, 5), &H24),
            digits([
                (Glyph::Digit(1), false),
                (Glyph::Digit(3), true),
                (Glyph::Digit(4), true),
                (Glyph::Digit(5), false),
            ])
        );
    }

    #[test]
    fn setting_minutes_blanks_minutes() {
        assert_eq!(
            DisplayMode::SetMinute { flash: true }.render(&readings(13, 45, 5), &H24),
            digits([
                (Glyph::Digit(1), false),
                (Glyph::Digit(3), true),
                (Glyph::Blank, true),
                (Glyph::Blank, false),
            ])
        );
    }

    #[test]
    fn date_and_its_setting_modes() {
        let date = digits([
            (Glyph::Digit(0), false),
            (Glyph::Digit(7), true),
            (Glyph::Digit(0), false),
            (Glyph::Digit(4), false),
        ]);
        assert_eq!(DisplayMode::Date.render(&readings(0, 0, 0), &H24), date);
        assert_eq!(DisplayMode::SET_MONTH.render(&readings(0, 0, 0), &H24), date);
        assert_eq!(
            DisplayMode::SetMonth { flash: true }.render(&readings(0, 0, 0), &H24),
            digits([
                (Glyph::Blank, false),
                (Glyph::Blank, true),
                (Glyph::Digit(0), false),
                (Glyph::Digit(4), false),
            ])
        );
        assert_eq!(
            DisplayMode::SetDay { flash: true }.render(&readings(0, 0, 0), &H24),
            digits([
                (Glyph::Digit(0), false),
                (Glyph::Digit(7), true),
                (Glyph::Blank, false),
                (Glyph::Blank, false),
            ])
        );
    }

    #[test]
    fn weekday_is_framed_by_dashes() {
        assert_eq!(
            DisplayMode::Weekday.render(&readings(0, 0, 0), &H24),
            digits([
                (Glyph::Blank, false),
                (Glyph::Dash, false),
                (Glyph::Digit(3), false),
                (Glyph::Dash, false),
            ])
        );
    }

    #[test]
    fn temperature_shows_unit_and_sign() {
        let warm = Readings {
            temperature: 21,
            ..readings(0, 0, 0)
        };
        assert_eq!(
            DisplayMode::Temperature.render(&warm, &H24),
            digits([
                (Glyph::Digit(2), false),
                (Glyph::Digit(1), false),
                (Glyph::Celsius, true),
                (Glyph::Blank, false),
            ])
        );

        let cold = Readings {
            temperature: -7,
            ..readings(0, 0, 0)
        };
        let fahrenheit = ClockOptions {
            temperature_unit: TemperatureUnit::Fahrenheit,
            ..H24
        };
        assert_eq!(
            DisplayMode::Temperature.render(&cold, &fahrenheit),
            digits([
                (Glyph::Digit(0), false),
                (Glyph::Digit(7), false),
                (Glyph::Fahrenheit, true),
                (Glyph::Dash, false),
            ])
        );
    }

    #[test]
    fn temperature_is_clamped_to_two_digits() {
        let hot = Readings {
            temperature: 150,
            ..readings(0, 0, 0)
        };
        let shown = DisplayMode::Temperature.render(&hot, &H24);
        assert_eq!(shown.cell(0), Glyph::Digit(9).segments());
        assert_eq!(shown.cell(1), Glyph::Digit(9).segments());
    }
}
