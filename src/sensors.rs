//! Light and temperature sensing.

use crate::glyph::Glyph;
use crate::options::TemperatureUnit;

/// The two analog inputs the clock samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// Photoresistor divider. Lower readings mean more ambient light.
    Light,
    /// NTC thermistor divider.
    Thermistor,
}

/// A synchronous ADC.
pub trait Sensors {
    /// A 10-bit reading (0–1023) of `channel`.
    fn sample(&mut self, channel: SensorChannel) -> u16;
}

/// Converts a 10-bit light reading into the refresh scheduler's dim divisor.
///
/// Brighter surroundings give a smaller divisor and so a brighter display. The scheduler clamps
/// the result to its minimum.
#[must_use]
pub fn dim_divisor(light: u16) -> u8 {
    u8::try_from(light >> 5).unwrap_or(u8::MAX)
}

impl TemperatureUnit {
    /// Whole degrees for a 10-bit thermistor reading, before calibration.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "A u16 reading times 64 fits in i32; divisors are non-zero constants"
    )]
    #[must_use]
    pub fn degrees(self, raw: u16) -> i16 {
        let raw = i32::from(raw);
        let degrees = match self {
            Self::Celsius => 76 - raw * 64 / 637,
            // 354 ~= 637 * 5 / 9; 169 ~= 76 * 9 / 5 + 32
            Self::Fahrenheit => 169 - raw * 64 / 354,
        };
        i16::try_from(degrees).unwrap_or(i16::MIN)
    }

    /// The unit's label glyph.
    #[must_use]
    pub const fn glyph(self) -> Glyph {
        match self {
            Self::Celsius => Glyph::Celsius,
            Self::Fahrenheit => Glyph::Fahrenheit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dim_divisor;
    use crate::options::TemperatureUnit;

    #[test]
    fn zero_reading_is_the_formula_offset() {
        assert_eq!(TemperatureUnit::Celsius.degrees(0), 76);
        assert_eq!(TemperatureUnit::Fahrenheit.degrees(0), 169);
    }

    #[test]
    fn division_truncates() {
        // 10 * 64 / 637 = 1.004...
        assert_eq!(TemperatureUnit::Celsius.degrees(10), 75);
        // 9 * 64 / 637 = 0.904...
        assert_eq!(TemperatureUnit::Celsius.degrees(9), 76);
        // 6 * 64 / 354 = 1.08...
        assert_eq!(TemperatureUnit::Fahrenheit.degrees(6), 168);
    }

    #[test]
    fn full_scale_goes_below_zero() {
        assert_eq!(TemperatureUnit::Celsius.degrees(1023), 76 - 102);
        assert_eq!(TemperatureUnit::Fahrenheit.degrees(1023), 169 - 184);
    }

    #[test]
    fn light_maps_to_divisor() {
        assert_eq!(dim_divisor(0), 0);
        assert_eq!(dim_divisor(200), 6);
        assert_eq!(dim_divisor(1023), 31);
        assert_eq!(dim_divisor(u16::MAX), u8::MAX);
    }
}
