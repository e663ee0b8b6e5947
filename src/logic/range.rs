//! Start/end slot selection: `Empty → StartChosen → RangeChosen`.

use crate::models::{
    BookingRequest, CourtId, SelectionRange, SessionError, TimeSlot, MINUTES_PER_DAY,
};
use chrono::NaiveDate;

/// Apply one tap to the current selection and return the next selection.
///
/// - Occupied slots are rejected and the selection stays as it was.
/// - `Empty` → the tap becomes the start.
/// - `StartChosen`: tapping the start again does nothing; any other slot becomes the end.
///   The end is not required to come after the start; `end <= start` is recorded as
///   crossing midnight.
/// - `RangeChosen` → the range is dropped and the tap becomes the new start.
pub fn tap_slot(
    selection: SelectionRange,
    slot: &TimeSlot,
) -> Result<SelectionRange, SessionError> {
    if slot.occupied {
        return Err(SessionError::SlotOccupied(slot.label));
    }
    let tapped = slot.label;
    let next = match selection {
        SelectionRange::Empty | SelectionRange::RangeChosen { .. } => {
            SelectionRange::StartChosen { start: tapped }
        }
        SelectionRange::StartChosen { start } if start == tapped => selection,
        SelectionRange::StartChosen { start } => SelectionRange::RangeChosen {
            start,
            end: tapped,
            crosses_midnight: tapped <= start,
        },
    };
    Ok(next)
}

/// Length of a chosen range in minutes; `None` until both ends are picked.
///
/// Midnight crossing is read from the slot order (`end <= start`), the same rule
/// [`tap_slot`] records, so a hand-built range with a stale flag cannot underflow.
pub fn duration_minutes(selection: &SelectionRange) -> Option<u32> {
    match *selection {
        SelectionRange::RangeChosen { start, end, .. } => {
            let mut end_min = end.minute_of_day();
            if end <= start {
                end_min += MINUTES_PER_DAY;
            }
            Some(end_min - start.minute_of_day())
        }
        _ => None,
    }
}

/// Price of a chosen range: `duration / 60 × hourly_rate`.
pub fn cost(selection: &SelectionRange, hourly_rate: f64) -> Option<f64> {
    duration_minutes(selection).map(|d| f64::from(d) / 60.0 * hourly_rate)
}

/// Turn a complete selection into the booking handoff.
pub fn confirm(
    selection: &SelectionRange,
    date: NaiveDate,
    court: CourtId,
    hourly_rate: f64,
) -> Result<BookingRequest, SessionError> {
    let (start, end) = match *selection {
        SelectionRange::RangeChosen { start, end, .. } => (start, end),
        _ => return Err(SessionError::IncompleteRange),
    };
    if start == end {
        return Err(SessionError::EmptyRange);
    }
    let crosses_midnight = end < start;
    let duration = duration_minutes(selection).ok_or(SessionError::IncompleteRange)?;
    if crosses_midnight {
        // Accepted as-is: the end is read as next-day time.
        log::warn!(
            "Booking {} {}-{} on court {} continues past midnight",
            date,
            start,
            end,
            court
        );
    }
    Ok(BookingRequest {
        date,
        court,
        start_slot: start,
        end_slot: end,
        crosses_midnight,
        duration_minutes: duration,
        cost: f64::from(duration) / 60.0 * hourly_rate,
    })
}
