use std::fmt;

use chrono::Timelike;

/// Milliseconds elapsed since local midnight, in `[0, 86_400_000)`.
///
/// Always computed from a fresh clock read; nothing holds one across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MS_PER_SECOND: u32 = 1_000;
    pub const MS_PER_MINUTE: u32 = 60_000;
    pub const MS_PER_HOUR: u32 = 3_600_000;
    pub const MS_PER_DAY: u32 = 86_400_000;

    pub const MIDNIGHT: Self = Self(0);
    /// 23:59:59.999
    pub const MAX: Self = Self(Self::MS_PER_DAY - 1);

    /// Returns `None` unless `hour < 24`, `minute < 60`, `second < 60` and
    /// `milli < 1000`.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 || milli >= 1_000 {
            return None;
        }
        Some(Self(
            hour * Self::MS_PER_HOUR
                + minute * Self::MS_PER_MINUTE
                + second * Self::MS_PER_SECOND
                + milli,
        ))
    }

    /// Extract hour, minute, second and sub-second milliseconds from a
    /// wall-clock reading.
    ///
    /// chrono encodes a leap second as second 59 with a nanosecond field of
    /// 1e9 or more; that reading is pinned to millisecond 999 so the value
    /// stays inside the day.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        let milli = (time.nanosecond() / 1_000_000).min(999);
        Self(
            time.hour() * Self::MS_PER_HOUR
                + time.minute() * Self::MS_PER_MINUTE
                + time.second() * Self::MS_PER_SECOND
                + milli,
        )
    }

    pub fn as_millis(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
