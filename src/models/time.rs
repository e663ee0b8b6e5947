//! Wall-clock time of day (HH:MM) as used by court hours, slots and reservations.

use crate::models::error::SessionError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day, stored as minutes since midnight (0..1440).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from hours and minutes; `None` if out of range.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(Self((hours * 60 + minutes) as u16))
    }

    /// Any minute count, wrapped onto the 24h wheel.
    pub fn from_minutes_wrapping(minutes: u32) -> Self {
        Self((minutes % MINUTES_PER_DAY) as u16)
    }

    pub fn minute_of_day(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hours(self) -> u32 {
        self.minute_of_day() / 60
    }

    pub fn minutes(self) -> u32 {
        self.minute_of_day() % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for ClockTime {
    type Err = SessionError;

    /// Accepts `HH:MM` (and `H:MM`); seconds are not allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let t = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| SessionError::InvalidTime(trimmed.to_string()))?;
        Self::from_hm(t.hour(), t.minute())
            .ok_or_else(|| SessionError::InvalidTime(trimmed.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}
