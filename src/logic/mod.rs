//! Scheduling and allocation logic: slots, range selection, capacity, assignment, export.

mod allocation;
mod assignment;
mod availability;
mod booking;
mod capacity;
mod organizer;
mod range;
mod roles;
mod slots;
mod temp_ids;

pub use allocation::AllocationSession;
pub use assignment::{AssignmentRegistry, TeamFilled};
pub use availability::{AvailabilityFeed, AvailabilityTicket};
pub use booking::{BookingSession, CourtDay};
pub use capacity::{plan_teams, resolve_shortfall};
pub use organizer::{export, organize, parse_summary_shortfall, TeamGroup};
pub use range::{confirm, cost, duration_minutes, tap_slot};
pub use roles::{max_setters, RoleQuota};
pub use slots::{generate_slots, is_occupied, mark_availability, slots_for_schedule};
pub use temp_ids::{TempIdAllocator, MAX_ID_ATTEMPTS};
