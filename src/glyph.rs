//! Seven-segment glyphs for the clock's digits and symbols.

/// Segment A of the 7-segment display.
const SEG_A: u8 = 0b_0000_0001;
/// Segment B of the 7-segment display.
const SEG_B: u8 = 0b_0000_0010;
/// Segment C of the 7-segment display.
const SEG_C: u8 = 0b_0000_0100;
/// Segment D of the 7-segment display.
const SEG_D: u8 = 0b_0000_1000;
/// Segment E of the 7-segment display.
const SEG_E: u8 = 0b_0001_0000;
/// Segment F of the 7-segment display.
const SEG_F: u8 = 0b_0010_0000;
/// Segment G of the 7-segment display.
const SEG_G: u8 = 0b_0100_0000;

/// Array representing the segments for digits 0-9 on a 7-segment display.
const DIGITS: [u8; 10] = [
    0b_0011_1111, // Digit 0
    0b_0000_0110, // Digit 1
    0b_0101_1011, // Digit 2
    0b_0100_1111, // Digit 3
    0b_0110_0110, // Digit 4
    0b_0110_1101, // Digit 5
    0b_0111_1101, // Digit 6
    0b_0000_0111, // Digit 7
    0b_0111_1111, // Digit 8
    0b_0110_1111, // Digit 9
];

/// Something one digit of the display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// A decimal digit. Values above 9 render blank.
    Digit(u8),
    Blank,
    Dash,
    Celsius,
    Fahrenheit,
}

impl Glyph {
    /// The segment pattern, segment A in bit 0 through G in bit 6. Bit 7 (decimal point) is clear.
    #[must_use]
    pub fn segments(self) -> u8 {
        match self {
            Self::Digit(digit) => DIGITS.get(usize::from(digit)).copied().unwrap_or(0),
            Self::Blank => 0,
            Self::Dash => SEG_G,
            Self::Celsius => SEG_A | SEG_D | SEG_E | SEG_F,
            Self::Fahrenheit => SEG_A | SEG_E | SEG_F | SEG_G,
        }
    }

    /// The tens and ones digits of a two-digit value.
    #[inline]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Division by a non-zero constant"
    )]
    #[must_use]
    pub const fn pair(value: u8) -> (Self, Self) {
        (Self::Digit((value / 10) % 10), Self::Digit(value % 10))
    }
}
