//! Time-of-day and booking window types.
//!
//! Reservation times travel as `"HH:MM"` strings and days as ISO-8601
//! `"YYYY-MM-DD"` strings. Windows are measured in minutes from midnight
//! of the booked day and do not wrap: a 60 minute booking at `23:30` ends
//! at minute 1530 of that day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock start time with minute precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Build a time from hours and minutes, rejecting out-of-range values.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        (hours < 24 && minutes < 60).then(|| Self(hours * 60 + minutes))
    }

    /// Build a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Parse a strict `"HH:MM"` string.
    pub fn parse(s: &str) -> AppResult<Self> {
        s.parse()
    }

}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AppError::parse(format!("Invalid time of day '{s}', expected HH:MM"));

        let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let hours: u32 = hours.parse().map_err(|_| malformed())?;
        let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
        Self::from_hm(hours, minutes).ok_or_else(malformed)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a strict ISO-8601 calendar day (`"YYYY-MM-DD"`).
pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        AppError::with_source(
            ErrorKind::Parse,
            format!("Invalid day '{s}', expected YYYY-MM-DD"),
            e,
        )
    })
}

/// Half-open booking interval `[start, end)` in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    /// First occupied minute.
    pub start: u32,
    /// First minute after the booking ends.
    pub end: u32,
}

impl SlotWindow {
    /// Longest booking a window may describe.
    pub const MAX_DURATION_MINUTES: u32 = MINUTES_PER_DAY;

    /// Window starting at `start` and lasting `duration_minutes`.
    ///
    /// The end saturates, so an oversized duration never wraps below `start`.
    pub fn new(start: TimeOfDay, duration_minutes: u32) -> Self {
        Self {
            start: start.minutes(),
            end: start.minutes().saturating_add(duration_minutes),
        }
    }

    /// Window for a duration in `1..=MAX_DURATION_MINUTES`, `None` otherwise.
    pub fn bounded(start: TimeOfDay, duration_minutes: u32) -> Option<Self> {
        Self::is_valid_duration(duration_minutes).then(|| Self::new(start, duration_minutes))
    }

    /// Whether `duration_minutes` is a positive length of at most one day.
    pub fn is_valid_duration(duration_minutes: u32) -> bool {
        (1..=Self::MAX_DURATION_MINUTES).contains(&duration_minutes)
    }

    /// Two windows overlap iff each starts before the other ends.
    ///
    /// A booking ending exactly when another starts does not overlap it.
    pub fn overlaps(&self, other: &SlotWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}
