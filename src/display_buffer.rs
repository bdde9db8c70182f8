//! The four-digit frame the render step fills and the refresh scheduler shows.

use crate::glyph::Glyph;

/// The number of cells (digits) in the display.
pub const CELL_COUNT: usize = 4;

/// The number of segment lines per digit (seven segments plus the decimal point).
pub const SEGMENT_COUNT: usize = 8;

/// Decimal point of the 7-segment display.
pub const DECIMAL_POINT: u8 = 0b_1000_0000;

/// The cell whose digit is mounted upside down on the board.
pub const ROTATED_CELL: usize = 2;

/// Segment patterns for all four cells, left to right.
///
/// Each byte holds segments A–G in bits 0–6 and the decimal point in bit 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer([u8; CELL_COUNT]);

impl DisplayBuffer {
    /// A dark display.
    pub const BLANK: Self = Self([0; CELL_COUNT]);

    #[must_use]
    pub const fn new(cells: [u8; CELL_COUNT]) -> Self {
        Self(cells)
    }

    /// Writes `glyph` into cell `index`. Indexes past the last cell are ignored.
    pub fn set(&mut self, index: usize, glyph: Glyph, decimal_point: bool) {
        if let Some(cell) = self.0.get_mut(index) {
            *cell = glyph.segments() | if decimal_point { DECIMAL_POINT } else { 0 };
        }
    }

    /// Builds a buffer from four glyph/decimal-point pairs.
    #[must_use]
    pub fn from_glyphs(cells: [(Glyph, bool); CELL_COUNT]) -> Self {
        let mut buffer = Self::BLANK;
        for (index, (glyph, decimal_point)) in cells.into_iter().enumerate() {
            buffer.set(index, glyph, decimal_point);
        }
        buffer
    }

    #[must_use]
    pub const fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.0
    }

    /// The pattern for cell `index`, or blank past the last cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// The buffer as the board needs it: the rotated cell's pattern is turned upside down.
    #[must_use]
    pub fn wiring_corrected(mut self) -> Self {
        if let Some(cell) = self.0.get_mut(ROTATED_CELL) {
            *cell = rotate_upside_down(*cell);
        }
        self
    }
}

/// Swaps segments ABC with DEF, turning a digit upside down. G and the decimal point stay put.
#[must_use]
pub const fn rotate_upside_down(pattern: u8) -> u8 {
    (pattern & 0b_1100_0000) | ((pattern & 0b_0011_1000) >> 3) | ((pattern & 0b_0000_0111) << 3)
}

#[cfg(test)]
mod tests {
    use super::{DECIMAL_POINT, DisplayBuffer, rotate_upside_down};
    use crate::glyph::Glyph;

    #[test]
    fn rotation_swaps_lower_and_upper_halves() {
        // "1" lights B and C; upside down it lights E and F.
        assert_eq!(rotate_upside_down(0b_0000_0110), 0b_0011_0000);
        assert_eq!(rotate_upside_down(0b_0011_1000), 0b_0000_0111);
    }

    #[test]
    fn rotation_keeps_top_bits() {
        assert_eq!(rotate_upside_down(DECIMAL_POINT), DECIMAL_POINT);
        assert_eq!(rotate_upside_down(0b_0100_0000), 0b_0100_0000);
        assert_eq!(rotate_upside_down(0b_1100_0001), 0b_1100_1000);
    }

    #[test]
    fn rotating_twice_is_identity() {
        for pattern in 0..=u8::MAX {
            assert_eq!(rotate_upside_down(rotate_upside_down(pattern)), pattern);
        }
    }

    #[test]
    fn only_the_third_cell_is_corrected() {
        let one = Glyph::Digit(1).segments();
        let buffer = DisplayBuffer::new([one; 4]).wiring_corrected();
        assert_eq!(
            buffer.cells(),
            &[one, one, rotate_upside_down(one), one]
        );
    }

    #[test]
    fn set_adds_decimal_point() {
        let mut buffer = DisplayBuffer::BLANK;
        buffer.set(1, Glyph::Digit(0), true);
        buffer.set(9, Glyph::Digit(8), true);
        assert_eq!(buffer.cell(1), Glyph::Digit(0).segments() | DECIMAL_POINT);
        assert_eq!(buffer.cell(9), 0);
    }
}
