//! Shared state of the two periodic schedulers and the main task.
//!
//! Three threads of control touch a [`SchedulerContext`]: the display refresh scheduler (every
//! 100 µs, highest priority), the debounce scheduler (every 10 ms), and the cooperative main task.
//! Every shared cell is one byte with exactly one writer, so no locking is needed:
//!
//! | cell | writer | readers |
//! |---|---|---|
//! | tick counter | debounce | main task (delays) |
//! | switch history and press counts | debounce | main task (key presses) |
//! | dim divisor | main task | refresh |
//! | committed display cells | main task | refresh |
//!
//! The commit copies four cells one at a time. A refresh that lands mid-copy may show one frame
//! mixing old and new digits; the next frame is whole again.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::display_buffer::{CELL_COUNT, DisplayBuffer};
use crate::key_press::Key;
use crate::switch::SwitchChannel;
use crate::ticks::{TickSource, Ticks};

/// Frames lit out of every `dim_divisor` frames.
pub const LIT_FRAMES: u32 = 4;

/// The smallest dim divisor, i.e. full brightness.
pub const MIN_DIM_DIVISOR: u8 = 4;

/// State shared by the refresh scheduler, the debounce scheduler, and the main task.
#[derive(Debug)]
pub struct SchedulerContext {
    ticks: AtomicU8,
    adjust: SwitchChannel,
    advance: SwitchChannel,
    dim_divisor: AtomicU8,
    committed: [AtomicU8; CELL_COUNT],
}

impl SchedulerContext {
    /// Creates the context, ready to live in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU8::new(0),
            adjust: SwitchChannel::new(),
            advance: SwitchChannel::new(),
            dim_divisor: AtomicU8::new(MIN_DIM_DIVISOR),
            committed: [
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
            ],
        }
    }

    /// Body of the debounce scheduler: samples both buttons and advances the time base.
    ///
    /// `true` means the contact is closed (button pressed).
    pub fn debounce_tick(&self, adjust_closed: bool, advance_closed: bool) {
        self.adjust.sample(adjust_closed);
        self.advance.sample(advance_closed);
        self.ticks.store(
            self.ticks.load(Ordering::Relaxed).wrapping_add(1),
            Ordering::Relaxed,
        );
    }

    /// Body of the display refresh scheduler.
    ///
    /// The caller first turns every digit off, then, for [`Frame::Lit`], drives the segment bus
    /// and enables the one digit. Runs in constant time.
    pub fn refresh_step(&self, cursor: &mut RefreshCursor) -> Frame {
        let digit = cursor.digit;
        let divisor = u32::from(self.dim_divisor.load(Ordering::Relaxed));
        let lit = cursor
            .frame
            .checked_rem(divisor)
            .is_some_and(|phase| phase < LIT_FRAMES);
        cursor.advance();

        if lit {
            Frame::Lit {
                digit,
                segments: self.committed_cell(digit),
            }
        } else {
            Frame::Dark
        }
    }

    #[must_use]
    pub const fn switch(&self, key: Key) -> &SwitchChannel {
        match key {
            Key::Adjust => &self.adjust,
            Key::Advance => &self.advance,
        }
    }

    /// Sets the refresh duty cycle to `LIT_FRAMES / divisor`, clamped to full brightness.
    pub fn set_dim_divisor(&self, divisor: u8) {
        self.dim_divisor
            .store(divisor.max(MIN_DIM_DIVISOR), Ordering::Relaxed);
    }

    #[must_use]
    pub fn dim_divisor(&self) -> u8 {
        self.dim_divisor.load(Ordering::Relaxed)
    }

    /// Copies a rendered buffer to the cells the refresh scheduler reads.
    pub fn commit(&self, buffer: &DisplayBuffer) {
        for (cell, &bits) in self.committed.iter().zip(buffer.cells()) {
            cell.store(bits, Ordering::Relaxed);
        }
    }

    /// A copy of the committed cells.
    #[must_use]
    pub fn committed(&self) -> DisplayBuffer {
        let mut cells = [0; CELL_COUNT];
        for (bits, cell) in cells.iter_mut().zip(&self.committed) {
            *bits = cell.load(Ordering::Relaxed);
        }
        DisplayBuffer::new(cells)
    }

    fn committed_cell(&self, digit: u8) -> u8 {
        self.committed
            .get(usize::from(digit))
            .map_or(0, |cell| cell.load(Ordering::Relaxed))
    }
}

impl Default for SchedulerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SchedulerContext {
    fn now(&self) -> Ticks {
        self.ticks.load(Ordering::Relaxed)
    }
}

/// Refresh-scheduler-private position: which digit is next and a free-running frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshCursor {
    digit: u8,
    frame: u32,
}

impl RefreshCursor {
    #[expect(clippy::arithmetic_side_effects, reason = "digit < CELL_COUNT")]
    fn advance(&mut self) {
        self.digit = if usize::from(self.digit) + 1 >= CELL_COUNT {
            0
        } else {
            self.digit + 1
        };
        self.frame = self.frame.wrapping_add(1);
    }
}

/// What one refresh period shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// All digits stay off for this period.
    Dark,
    /// Drive `segments` onto the bus and enable `digit`.
    Lit { digit: u8, segments: u8 },
}

#[cfg(test)]
mod tests {
    use super::{Frame, MIN_DIM_DIVISOR, RefreshCursor, SchedulerContext};
    use crate::display_buffer::DisplayBuffer;
    use crate::key_press::Key;
    use crate::ticks::TickSource;

    fn lit_frames(context: &SchedulerContext, frames: u32) -> u32 {
        let mut cursor = RefreshCursor::default();
        let mut lit = 0;
        for _ in 0..frames {
            if let Frame::Lit { .. } = context.refresh_step(&mut cursor) {
                lit += 1;
            }
        }
        lit
    }

    #[test]
    fn full_brightness_lights_every_frame() {
        let context = SchedulerContext::new();
        assert_eq!(lit_frames(&context, 400), 400);
    }

    #[test]
    fn divisor_100_is_four_percent() {
        let context = SchedulerContext::new();
        context.set_dim_divisor(100);
        assert_eq!(lit_frames(&context, 10_000), 400);
    }

    #[test]
    fn divisor_190_lights_four_of_190() {
        let context = SchedulerContext::new();
        context.set_dim_divisor(190);
        assert_eq!(lit_frames(&context, 190), 4);
        assert_eq!(lit_frames(&context, 1900), 40);
    }

    #[test]
    fn divisor_is_clamped() {
        let context = SchedulerContext::new();
        context.set_dim_divisor(0);
        assert_eq!(context.dim_divisor(), MIN_DIM_DIVISOR);
    }

    #[test]
    fn refresh_cycles_through_committed_digits() {
        let context = SchedulerContext::new();
        context.commit(&DisplayBuffer::new([1, 2, 3, 4]));
        let mut cursor = RefreshCursor::default();
        let shown: [Frame; 5] = core::array::from_fn(|_| context.refresh_step(&mut cursor));
        assert_eq!(
            shown,
            [
                Frame::Lit { digit: 0, segments: 1 },
                Frame::Lit { digit: 1, segments: 2 },
                Frame::Lit { digit: 2, segments: 3 },
                Frame::Lit { digit: 3, segments: 4 },
                Frame::Lit { digit: 0, segments: 1 },
            ]
        );
    }

    #[test]
    fn dimmed_frames_still_rotate_digits() {
        let context = SchedulerContext::new();
        context.set_dim_divisor(6);
        let mut cursor = RefreshCursor::default();
        let mut digits = [0_u32; 4];
        for _ in 0..(6 * 4 * 10) {
            if let Frame::Lit { digit, .. } = context.refresh_step(&mut cursor) {
                if let Some(count) = digits.get_mut(usize::from(digit)) {
                    *count += 1;
                }
            }
        }
        assert_eq!(digits, [40, 40, 40, 40]);
    }

    #[test]
    fn debounce_tick_advances_time_and_switches() {
        let context = SchedulerContext::new();
        for _ in 0..300 {
            context.debounce_tick(true, false);
        }
        assert_eq!(context.now(), 44);
        assert_ne!(context.switch(Key::Adjust).press_count(), 0);
        assert_eq!(context.switch(Key::Advance).press_count(), 0);
    }
}
