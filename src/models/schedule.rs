//! Court hours, slots, reservations and the booking handoff.

use crate::models::error::SessionError;
use crate::models::time::ClockTime;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a court, as used by the external booking service.
pub type CourtId = String;

/// Operating hours and pricing of a court. `close_time <= open_time` means the court
/// closes after midnight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtSchedule {
    pub open_time: ClockTime,
    pub close_time: ClockTime,
    pub step_minutes: u32,
    pub hourly_rate: f64,
}

impl CourtSchedule {
    pub fn new(
        open_time: ClockTime,
        close_time: ClockTime,
        step_minutes: u32,
        hourly_rate: f64,
    ) -> Result<Self, SessionError> {
        let schedule = Self {
            open_time,
            close_time,
            step_minutes,
            hourly_rate,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check values that may have come in through deserialization.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.step_minutes == 0 {
            return Err(SessionError::InvalidStep);
        }
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(SessionError::InvalidRate);
        }
        Ok(())
    }

    pub fn crosses_midnight(&self) -> bool {
        self.close_time < self.open_time
    }
}

/// A bookable slot. Regenerated whenever date or court changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: ClockTime,
    pub occupied: bool,
}

/// An existing reservation on the same day. Never wraps midnight.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OccupiedInterval {
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl OccupiedInterval {
    pub fn new(start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Half-open: the start minute is inside, the end minute is not.
    pub fn contains(&self, t: ClockTime) -> bool {
        self.start_time <= t && t < self.end_time
    }
}

/// Range picked by the user, in one of three states.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionRange {
    #[default]
    Empty,
    StartChosen {
        start: ClockTime,
    },
    RangeChosen {
        start: ClockTime,
        end: ClockTime,
        /// `end <= start`: the booking continues into the next day.
        crosses_midnight: bool,
    },
}

/// Finalized booking, handed to the external booking-creation endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub court: CourtId,
    pub start_slot: ClockTime,
    pub end_slot: ClockTime,
    pub crosses_midnight: bool,
    pub duration_minutes: u32,
    pub cost: f64,
}
