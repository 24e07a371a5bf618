//! Breakdown of a remaining duration into calendar-style units

pub const SECOND: u64 = 1000;
pub const MINUTE: u64 = 60 * SECOND;
pub const HOUR: u64 = 60 * MINUTE;
pub const DAY: u64 = 24 * HOUR;

/// A remaining duration split into days, hours, minutes, seconds and milliseconds.
///
/// Derived and stateless: recomputed from `remain` on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeData {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl TimeData {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / DAY,
            hours: ms % DAY / HOUR,
            minutes: ms % HOUR / MINUTE,
            seconds: ms % MINUTE / SECOND,
            milliseconds: ms % SECOND,
        }
    }

    /// Inverse of [`TimeData::from_millis`]
    pub fn total_millis(&self) -> u64 {
        self.days * DAY
            + self.hours * HOUR
            + self.minutes * MINUTE
            + self.seconds * SECOND
            + self.milliseconds
    }
}

/// Split `ms` into a [`TimeData`]
pub fn decompose(ms: u64) -> TimeData {
    TimeData::from_millis(ms)
}
