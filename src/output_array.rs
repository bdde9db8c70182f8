use embassy_rp::gpio::{self, Level};

use crate::Result;
use crate::error::Error::IndexOutOfBounds;

/// Array of GPIO output pins: the display's digit enables or its segment bus.
pub struct OutputArray<'a, const N: usize>([gpio::Output<'a>; N]);

impl<'a, const N: usize> OutputArray<'a, N> {
    pub const fn new(outputs: [gpio::Output<'a>; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub fn set_all(&mut self, level: Level) {
        for output in &mut self.0 {
            output.set_level(level);
        }
    }

    #[inline]
    pub(crate) fn set_level_at_index(&mut self, index: u8, level: Level) -> Result<()> {
        self.0
            .get_mut(usize::from(index))
            .ok_or(IndexOutOfBounds)?
            .set_level(level);
        Ok(())
    }
}

impl OutputArray<'_, { u8::BITS as usize }> {
    /// Drives bit 0 onto the first pin, bit 1 onto the second, and so on. High is lit.
    #[expect(clippy::shadow_reuse, reason = "Consuming the bits as they are written")]
    #[inline]
    pub(crate) fn set_from_bits(&mut self, bits: u8) {
        let mut bits = bits;
        for output in &mut self.0 {
            let level: Level = ((bits & 1) == 1).into();
            output.set_level(level);
            bits >>= 1;
        }
    }
}
