//! Court session core: library with models and scheduling / team allocation logic.

pub mod logic;
pub mod models;

pub use logic::{
    confirm, cost, duration_minutes, export, generate_slots, is_occupied, mark_availability,
    max_setters, organize, parse_summary_shortfall, plan_teams, resolve_shortfall,
    slots_for_schedule, tap_slot, AllocationSession, AssignmentRegistry,
    AvailabilityFeed, AvailabilityTicket, BookingSession, CourtDay, RoleQuota, TeamFilled,
    TeamGroup, TempIdAllocator, MAX_ID_ATTEMPTS,
};
pub use models::{
    BookingRequest, CapacityPolicy, ClockTime, CourtId, CourtSchedule, ErrorKind,
    OccupiedInterval, Placement, Player, PlayerId, RosterSubmission, SelectionRange,
    SessionError, SessionId, ShortfallResolution, Team, TeamPlan, TeamRoster, TimeSlot,
    MINUTES_PER_DAY,
};
