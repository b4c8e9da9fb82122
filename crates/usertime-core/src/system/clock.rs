use std::cell::Cell;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Wall-clock time source.
///
/// Implementations return the host's local date and time with at least
/// millisecond resolution. Every call is a fresh read.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// The operating system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a chosen instant until explicitly moved.
///
/// Used for reproducible runs (`usertime run --at ...`) and in tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Frozen at `time` on 1970-01-01.
    pub fn at_time(time: NaiveTime) -> Self {
        Self::new(NaiveDateTime::new(NaiveDate::default(), time))
    }

    /// Returns `None` if any component is out of range.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> Option<Self> {
        NaiveTime::from_hms_milli_opt(hour, minute, second, milli).map(Self::at_time)
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock forward (or backward, for a negative delta).
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn fixed_clock_holds_still() {
        let clock = FixedClock::from_hms_milli(14, 5, 9, 250).unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().time().nanosecond(), 250_000_000);
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::from_hms_milli(0, 0, 0, 0).unwrap();
        clock.advance(TimeDelta::milliseconds(1_500));
        assert_eq!(clock.now().time(), NaiveTime::from_hms_milli_opt(0, 0, 1, 500).unwrap());
    }

    #[test]
    fn fixed_clock_rejects_out_of_range() {
        assert!(FixedClock::from_hms_milli(24, 0, 0, 0).is_none());
        assert!(FixedClock::from_hms_milli(0, 60, 0, 0).is_none());
        assert!(FixedClock::from_hms_milli(0, 0, 0, 1_000).is_none());
    }

    #[test]
    fn borrowed_clock_reads_through() {
        let clock = FixedClock::from_hms_milli(1, 2, 3, 4).unwrap();
        let borrowed: &FixedClock = &clock;
        assert_eq!(Clock::now(&borrowed), clock.now());
    }
}
