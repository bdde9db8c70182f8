//! The system time base and the blocking delay built on it.
//!
//! The debounce scheduler is the only writer of the tick counter. Everything that waits in the
//! main task (the heartbeat, the key-press guard, the end-of-iteration settle) waits on the same
//! counter, so "how long has this button been held" and "how long has the main task slept" share
//! one clock.

/// A count of debounce-scheduler periods. Wraps at [`Ticks::MAX`].
pub type Ticks = u8;

/// Length of one tick, in milliseconds.
pub const TICK_MILLIS: u64 = 10;

/// A monotonic, wrapping tick counter.
pub trait TickSource {
    /// The current tick count.
    fn now(&self) -> Ticks;

    /// Spins until `duration` ticks have elapsed since the call.
    ///
    /// Only the main task may wait; the periodic schedulers never call this.
    fn delay(&self, duration: Ticks) {
        let start = self.now();
        while self.now().wrapping_sub(start) < duration {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TickSource, Ticks};
    use core::cell::Cell;

    /// Advances one tick on every read.
    struct Stepping {
        now: Cell<Ticks>,
        reads: Cell<u32>,
    }

    impl TickSource for Stepping {
        fn now(&self) -> Ticks {
            self.reads.set(self.reads.get() + 1);
            let now = self.now.get().wrapping_add(1);
            self.now.set(now);
            now
        }
    }

    #[test]
    fn delay_tolerates_wrap() {
        let clock = Stepping {
            now: Cell::new(250),
            reads: Cell::new(0),
        };
        clock.delay(10);
        assert_eq!(clock.now.get(), 5);
        assert_eq!(clock.reads.get(), 11);
    }

    #[test]
    fn zero_delay_checks_the_clock_once() {
        let clock = Stepping {
            now: Cell::new(0),
            reads: Cell::new(0),
        };
        clock.delay(0);
        assert_eq!(clock.reads.get(), 2);
    }
}
