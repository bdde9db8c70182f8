//! Debounced switch inputs, written by the debounce scheduler and read by the main task.

use core::sync::atomic::{AtomicU8, Ordering};

/// The most recent samples that must all read "closed" before a press starts counting.
const SETTLED_MASK: u8 = 0b_0000_1111;

/// A press count above this is rebased to [`REBASED_PRESS_COUNT`].
pub const PRESS_COUNT_CEILING: u8 = 250;

/// Where a long-held press count restarts. Stays above the long-press threshold.
pub const REBASED_PRESS_COUNT: u8 = 100;

/// One momentary button, sampled every tick.
///
/// Both cells are single bytes written only by the debounce scheduler, so the main task always
/// reads a whole value. Only `load`/`store` are used; the Cortex-M0+ has no atomic read-modify-write.
#[derive(Debug)]
pub struct SwitchChannel {
    /// Shift register of raw samples, newest in bit 0. A set bit is an open contact.
    history: AtomicU8,
    press_count: AtomicU8,
}

impl SwitchChannel {
    /// A released switch. The history starts all-open so power-up never reads as a press.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: AtomicU8::new(u8::MAX),
            press_count: AtomicU8::new(0),
        }
    }

    /// Shifts in one raw sample and updates the press count.
    pub fn sample(&self, closed: bool) {
        let history = (self.history.load(Ordering::Relaxed) << 1) | u8::from(!closed);
        self.history.store(history, Ordering::Relaxed);

        let press_count = if history & SETTLED_MASK == 0 {
            match self.press_count.load(Ordering::Relaxed).saturating_add(1) {
                count if count > PRESS_COUNT_CEILING => REBASED_PRESS_COUNT,
                count => count,
            }
        } else {
            0
        };
        self.press_count.store(press_count, Ordering::Relaxed);
    }

    /// Ticks the switch has been held closed, less the settling window.
    #[must_use]
    pub fn press_count(&self) -> u8 {
        self.press_count.load(Ordering::Relaxed)
    }

    /// The last eight raw samples, newest in bit 0 (set = open).
    #[must_use]
    pub fn history(&self) -> u8 {
        self.history.load(Ordering::Relaxed)
    }
}

impl Default for SwitchChannel {
    fn default() -> Self {
        Self::new()
    }
}
