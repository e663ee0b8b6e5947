//! Booking workflow: pick a court and date, load reservations, choose a range, confirm.

use crate::logic::availability::{AvailabilityFeed, AvailabilityTicket};
use crate::logic::range;
use crate::logic::slots::{mark_availability, slots_for_schedule};
use crate::models::{
    BookingRequest, ClockTime, CourtId, CourtSchedule, OccupiedInterval, SelectionRange,
    SessionError, SessionId, TimeSlot,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Court and date currently on screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtDay {
    pub date: NaiveDate,
    pub court: CourtId,
    pub schedule: CourtSchedule,
}

/// One user's booking workflow. Nothing here is persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingSession {
    pub id: SessionId,
    pub court_day: Option<CourtDay>,
    pub slots: Vec<TimeSlot>,
    pub selection: SelectionRange,
    feed: AvailabilityFeed,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            court_day: None,
            slots: Vec::new(),
            selection: SelectionRange::Empty,
            feed: AvailabilityFeed::new(),
        }
    }

    /// Switch to a court/date. Slots are regenerated and the selection is cleared; the
    /// returned ticket must accompany the reservations fetched for this pair.
    pub fn select_court(
        &mut self,
        date: NaiveDate,
        court: CourtId,
        schedule: CourtSchedule,
    ) -> Result<AvailabilityTicket, SessionError> {
        schedule.validate()?;
        let ticket = self.feed.request(date, court.clone());
        self.slots = mark_availability(&slots_for_schedule(&schedule), &[]);
        self.selection = SelectionRange::Empty;
        self.court_day = Some(CourtDay {
            date,
            court,
            schedule,
        });
        Ok(ticket)
    }

    /// Apply fetched reservations. Responses to an outdated ticket are dropped.
    pub fn receive_availability(
        &mut self,
        ticket: &AvailabilityTicket,
        intervals: Vec<OccupiedInterval>,
    ) -> Result<(), SessionError> {
        self.feed.receive(ticket, intervals)?;
        let labels: Vec<ClockTime> = self.slots.iter().map(|s| s.label).collect();
        self.slots = mark_availability(&labels, self.feed.intervals());
        Ok(())
    }

    pub fn availability_loaded(&self) -> bool {
        self.feed.is_loaded()
    }

    /// Tap a slot by its label.
    pub fn tap_slot(&mut self, label: ClockTime) -> Result<SelectionRange, SessionError> {
        if self.court_day.is_none() {
            return Err(SessionError::NoCourtSelected);
        }
        if !self.feed.is_loaded() {
            return Err(SessionError::AvailabilityPending);
        }
        let slot = self
            .slots
            .iter()
            .find(|s| s.label == label)
            .ok_or(SessionError::UnknownSlot(label))?;
        self.selection = range::tap_slot(self.selection, slot)?;
        Ok(self.selection)
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        range::duration_minutes(&self.selection)
    }

    pub fn cost(&self) -> Option<f64> {
        let day = self.court_day.as_ref()?;
        range::cost(&self.selection, day.schedule.hourly_rate)
    }

    /// Build the booking handoff. Session state is left as is.
    pub fn confirm(&self) -> Result<BookingRequest, SessionError> {
        let day = self.court_day.as_ref().ok_or(SessionError::NoCourtSelected)?;
        range::confirm(
            &self.selection,
            day.date,
            day.court.clone(),
            day.schedule.hourly_rate,
        )
    }
}
