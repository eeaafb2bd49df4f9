//! Timestamp type for absolute simulated time.
//!
//! The simulation clock is derived, never sampled: a model is constructed
//! with a start timestamp and the current time is always
//! `start + tick × 6 minutes`. Nothing in the core reads a wall clock.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated minutes that elapse per tick.
pub const MINUTES_PER_TICK: i64 = 6;

/// Error type for timestamp construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError {
    /// Description of the invalid component.
    pub reason: String,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid timestamp: {}", self.reason)
    }
}

impl std::error::Error for TimestampError {}

/// An absolute timestamp in simulated time.
///
/// Timestamps are timezone-naive. They anchor pet creation times and the
/// simulation clock; message timestamps on the wire stay `u64` milliseconds.
///
/// # Examples
///
/// ```
/// use companion_dynamics::types::Timestamp;
///
/// let start = Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0);
/// let later = start.plus_ticks(10);
/// assert_eq!(later.hour_of_day(), 9.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    inner: NaiveDateTime,
}

impl Timestamp {
    /// Creates a timestamp from date and time components.
    ///
    /// # Panics
    ///
    /// Panics if the components are invalid. For fallible construction use
    /// [`Timestamp::try_from_ymd_hms`].
    #[must_use]
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self::try_from_ymd_hms(year, month, day, hour, min, sec)
            .expect("Invalid date/time components")
    }

    /// Attempts to create a timestamp from date and time components.
    ///
    /// # Errors
    ///
    /// Returns an error if the components do not form a valid date/time.
    pub fn try_from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Result<Self, TimestampError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| TimestampError {
            reason: format!("date {}-{:02}-{:02}", year, month, day),
        })?;
        let inner = date
            .and_hms_opt(hour, min, sec)
            .ok_or_else(|| TimestampError {
                reason: format!("time {:02}:{:02}:{:02}", hour, min, sec),
            })?;
        Ok(Timestamp { inner })
    }

    /// Returns the timestamp advanced by the given number of ticks.
    #[must_use]
    pub fn plus_ticks(self, ticks: u64) -> Self {
        let minutes = ticks as i64 * MINUTES_PER_TICK;
        Timestamp {
            inner: self.inner + chrono::Duration::minutes(minutes),
        }
    }

    /// Returns the hour of day as a fraction (e.g. 9.5 for 09:30).
    #[must_use]
    pub fn hour_of_day(self) -> f32 {
        use chrono::Timelike;
        self.inner.hour() as f32 + self.inner.minute() as f32 / 60.0
    }

    /// Returns milliseconds since the Unix epoch.
    ///
    /// Used to stamp outgoing messages, which carry `u64` milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.inner.and_utc().timestamp_millis().max(0) as u64
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d %H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_components() {
        let ts = Timestamp::from_ymd_hms(2024, 1, 15, 14, 30, 0);
        assert_eq!(format!("{}", ts), "2024-01-15 14:30:00");
    }

    #[test]
    fn invalid_date_rejected() {
        assert!(Timestamp::try_from_ymd_hms(2024, 2, 30, 0, 0, 0).is_err());
    }

    #[test]
    fn invalid_time_rejected() {
        assert!(Timestamp::try_from_ymd_hms(2024, 1, 1, 25, 0, 0).is_err());
    }

    #[test]
    fn ticks_advance_six_minutes_each() {
        let start = Timestamp::from_ymd_hms(2024, 1, 1, 0, 0, 0);
        let after = start.plus_ticks(1);
        assert_eq!(format!("{}", after), "2024-01-01 00:06:00");
    }

    #[test]
    fn two_hundred_forty_ticks_is_one_day() {
        let start = Timestamp::from_ymd_hms(2024, 1, 1, 0, 0, 0);
        let after = start.plus_ticks(240);
        assert_eq!(format!("{}", after), "2024-01-02 00:00:00");
    }

    #[test]
    fn hour_of_day_fractional() {
        let ts = Timestamp::from_ymd_hms(2024, 1, 1, 9, 30, 0);
        assert!((ts.hour_of_day() - 9.5).abs() < f32::EPSILON);
    }

    #[test]
    fn millis_are_monotone() {
        let a = Timestamp::from_ymd_hms(2024, 1, 1, 0, 0, 0);
        let b = a.plus_ticks(1);
        assert!(b.as_millis() > a.as_millis());
    }
}
