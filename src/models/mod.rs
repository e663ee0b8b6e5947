//! Data structures for court booking and team allocation: times, slots, players, teams, errors.

mod error;
mod player;
mod schedule;
mod team;
mod time;

pub use error::{ErrorKind, SessionError};
pub use player::{Player, PlayerId};
pub use schedule::{
    BookingRequest, CourtId, CourtSchedule, OccupiedInterval, SelectionRange, TimeSlot,
};
pub use team::{
    CapacityPolicy, Placement, RosterSubmission, ShortfallResolution, Team, TeamPlan, TeamRoster,
};
pub use time::{ClockTime, MINUTES_PER_DAY};

/// Unique identifier for a booking or allocation session.
pub type SessionId = uuid::Uuid;
