//! Errors raised by booking and allocation operations.

use crate::models::player::PlayerId;
use crate::models::time::ClockTime;

/// Broad category of a [`SessionError`], used by callers to pick a recovery path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input or an action not allowed in the current state.
    Validation,
    /// Assignment beyond a team's effective capacity.
    TeamFull,
    /// The global setter cap is already reached.
    SetterQuotaExceeded,
    /// Temporary player id retries were exhausted.
    UniqueIdGenerationFailure,
    /// An availability response arrived for an outdated request. Not user-facing.
    StaleDataDiscarded,
}

/// Errors that can occur during a booking or allocation session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Time string is not a valid `HH:MM`.
    InvalidTime(String),
    /// Slot step must be at least one minute.
    InvalidStep,
    /// Hourly rate must be a finite, non-negative number.
    InvalidRate,
    /// No court/date has been chosen yet.
    NoCourtSelected,
    /// Reserved intervals for the current court/date have not arrived yet.
    AvailabilityPending,
    /// The tapped label is not one of the generated slots.
    UnknownSlot(ClockTime),
    /// Occupied slots can never be selected.
    SlotOccupied(ClockTime),
    /// Confirm requires both a start and an end slot.
    IncompleteRange,
    /// Start and end slot are the same.
    EmptyRange,
    /// Team size must be at least one.
    InvalidTeamSize,
    /// Team index does not exist under the current plan.
    TeamOutOfRange { team: usize, team_count: usize },
    /// Player id is not part of the roster.
    PlayerNotFound(PlayerId),
    /// The same player id appears twice in the roster.
    DuplicatePlayer(PlayerId),
    /// Leftover players need FillWithTemp or AcceptShortfall before this action.
    DecisionRequired { needed: usize },
    /// There is no shortfall decision to make.
    NoDecisionPending,
    /// A team already holds more players than the new plan allows it.
    ShortfallOverCapacity { team: usize, members: usize, capacity: usize },
    /// Target team is already at its effective capacity.
    TeamFull { team: usize, capacity: usize },
    /// Global setter cap reached.
    SetterQuotaExceeded { max: usize },
    /// Could not find a free temporary id.
    UniqueIdGenerationFailure { attempts: usize },
    /// Availability response does not belong to the latest request.
    StaleDataDiscarded { received: u64, latest: u64 },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::TeamFull { .. } => ErrorKind::TeamFull,
            SessionError::SetterQuotaExceeded { .. } => ErrorKind::SetterQuotaExceeded,
            SessionError::UniqueIdGenerationFailure { .. } => ErrorKind::UniqueIdGenerationFailure,
            SessionError::StaleDataDiscarded { .. } => ErrorKind::StaleDataDiscarded,
            _ => ErrorKind::Validation,
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidTime(s) => write!(f, "Invalid time '{}', expected HH:MM", s),
            SessionError::InvalidStep => write!(f, "Slot step must be at least 1 minute"),
            SessionError::InvalidRate => write!(f, "Hourly rate must be a non-negative number"),
            SessionError::NoCourtSelected => write!(f, "Select a court and date first"),
            SessionError::AvailabilityPending => write!(f, "Availability is still loading"),
            SessionError::UnknownSlot(t) => write!(f, "{} is not a bookable slot", t),
            SessionError::SlotOccupied(t) => write!(f, "{} is already reserved", t),
            SessionError::IncompleteRange => write!(f, "Select both a start and an end time"),
            SessionError::EmptyRange => write!(f, "Start and end time must differ"),
            SessionError::InvalidTeamSize => write!(f, "Team size must be at least 1"),
            SessionError::TeamOutOfRange { team, team_count } => {
                write!(f, "Team {} does not exist (there are {} teams)", team + 1, team_count)
            }
            SessionError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            SessionError::DuplicatePlayer(id) => write!(f, "Player {} is listed twice", id),
            SessionError::DecisionRequired { needed } => write!(
                f,
                "{} player(s) short: fill with temporary players or accept the shortfall",
                needed
            ),
            SessionError::NoDecisionPending => write!(f, "No shortfall decision is pending"),
            SessionError::ShortfallOverCapacity {
                team,
                members,
                capacity,
            } => write!(
                f,
                "Team {} has {} players but may only keep {}: unassign some first",
                team + 1,
                members,
                capacity
            ),
            SessionError::TeamFull { team, capacity } => {
                write!(f, "Team {} is full ({} players)", team + 1, capacity)
            }
            SessionError::SetterQuotaExceeded { max } => {
                write!(f, "At most {} setter(s) allowed", max)
            }
            SessionError::UniqueIdGenerationFailure { attempts } => {
                write!(f, "Could not generate a unique player id after {} attempts", attempts)
            }
            SessionError::StaleDataDiscarded { received, latest } => write!(
                f,
                "Discarded availability for request {} (latest is {})",
                received, latest
            ),
        }
    }
}

impl std::error::Error for SessionError {}
