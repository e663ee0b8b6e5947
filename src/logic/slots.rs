//! Slot generation from court hours and matching against existing reservations.

use crate::models::{ClockTime, CourtSchedule, OccupiedInterval, TimeSlot, MINUTES_PER_DAY};

/// Generate slot start times from `open` up to (not including) `close`, `step` minutes apart.
///
/// If `close` is not after `open` the window is taken to end on the next day, so
/// 22:00 → 02:00 yields 22:00 … 01:30 for a 30 minute step. `open == close` and a zero
/// step both yield no slots.
pub fn generate_slots(open: ClockTime, close: ClockTime, step: u32) -> Vec<ClockTime> {
    if open == close || step == 0 {
        return Vec::new();
    }
    let start = open.minute_of_day();
    let mut end = close.minute_of_day();
    if end <= start {
        end += MINUTES_PER_DAY;
    }
    (start..end)
        .step_by(step as usize)
        .map(ClockTime::from_minutes_wrapping)
        .collect()
}

/// Slots for a court's configured hours.
pub fn slots_for_schedule(schedule: &CourtSchedule) -> Vec<ClockTime> {
    generate_slots(schedule.open_time, schedule.close_time, schedule.step_minutes)
}

/// True if `slot` falls inside any reservation (`[start, end)`).
pub fn is_occupied(slot: ClockTime, intervals: &[OccupiedInterval]) -> bool {
    intervals.iter().any(|iv| iv.contains(slot))
}

/// Flag every slot against the reservations.
pub fn mark_availability(slots: &[ClockTime], intervals: &[OccupiedInterval]) -> Vec<TimeSlot> {
    slots
        .iter()
        .map(|&label| TimeSlot {
            label,
            occupied: is_occupied(label, intervals),
        })
        .collect()
}
