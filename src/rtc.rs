//! The real-time-clock contract and the time/date snapshot read through it.

/// One reading of the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDate {
    /// 0–23.
    pub hour: u8,
    /// 0–59.
    pub minute: u8,
    /// 0–59.
    pub second: u8,
    /// 1–12.
    pub month: u8,
    /// 1–31.
    pub day: u8,
    /// 1–7.
    pub weekday: u8,
}

impl Default for TimeDate {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            month: 1,
            day: 1,
            weekday: 1,
        }
    }
}

/// A field the buttons can step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Hour,
    Minute,
    Month,
    Day,
    Weekday,
}

impl TimeDate {
    /// Steps `field` by one, wrapping within its range.
    pub const fn increment(&mut self, field: TimeField) {
        match field {
            TimeField::Hour => self.hour = wrap_increment(self.hour, 0, 23),
            TimeField::Minute => self.minute = wrap_increment(self.minute, 0, 59),
            TimeField::Month => self.month = wrap_increment(self.month, 1, 12),
            TimeField::Day => self.day = wrap_increment(self.day, 1, 31),
            TimeField::Weekday => self.weekday = wrap_increment(self.weekday, 1, 7),
        }
    }

    /// Sets the time of day to 00:00:00, leaving the date alone.
    pub const fn reset_to_zero(&mut self) {
        self.hour = 0;
        self.minute = 0;
        self.second = 0;
    }

    /// The hour on a 12-hour dial (1–12) and whether it is PM.
    #[expect(clippy::arithmetic_side_effects, reason = "Bounded by the comparisons")]
    #[must_use]
    pub const fn hour_12(&self) -> (u8, bool) {
        let pm = self.hour >= 12;
        let hour = if pm { self.hour - 12 } else { self.hour };
        (if hour == 0 { 12 } else { hour }, pm)
    }
}

#[expect(clippy::arithmetic_side_effects, reason = "value < last")]
const fn wrap_increment(value: u8, first: u8, last: u8) -> u8 {
    if value >= last || value < first {
        first
    } else {
        value + 1
    }
}

/// The real-time clock. Only the main task calls it.
///
/// Implementations swallow bus or peripheral faults: a failed read returns the last good
/// snapshot (or the default) and a failed write is dropped.
pub trait Rtc {
    /// Starts the clock if it is not already running.
    fn init(&mut self);

    /// Reads the current time and date.
    fn snapshot(&mut self) -> TimeDate;

    /// Steps one field of the clock.
    fn increment(&mut self, field: TimeField);

    /// Sets the time of day to midnight.
    fn reset_to_zero(&mut self);

    fn increment_hour(&mut self) {
        self.increment(TimeField::Hour);
    }

    fn increment_minute(&mut self) {
        self.increment(TimeField::Minute);
    }

    fn increment_month(&mut self) {
        self.increment(TimeField::Month);
    }

    fn increment_day(&mut self) {
        self.increment(TimeField::Day);
    }

    fn increment_weekday(&mut self) {
        self.increment(TimeField::Weekday);
    }
}
