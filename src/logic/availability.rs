//! Reserved-interval feed for the currently selected (date, court).
//!
//! Fetches happen outside the core. Each request is tagged with a generation number and
//! only the response to the latest request is accepted.

use crate::models::{CourtId, OccupiedInterval, SessionError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Handed out for each fetch; must be presented with the response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityTicket {
    pub generation: u64,
    pub date: NaiveDate,
    pub court: CourtId,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AvailabilityFeed {
    generation: u64,
    /// Date and court of the latest request.
    latest: Option<(NaiveDate, CourtId)>,
    intervals: Vec<OccupiedInterval>,
    /// True once the latest request has been answered.
    loaded: bool,
}

impl AvailabilityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch. Any answer to an older ticket will be discarded.
    pub fn request(&mut self, date: NaiveDate, court: CourtId) -> AvailabilityTicket {
        self.generation += 1;
        self.intervals.clear();
        self.loaded = false;
        self.latest = Some((date, court.clone()));
        AvailabilityTicket {
            generation: self.generation,
            date,
            court,
        }
    }

    /// Accept the response for `ticket` if it is still the latest request, for the same
    /// date and court.
    pub fn receive(
        &mut self,
        ticket: &AvailabilityTicket,
        intervals: Vec<OccupiedInterval>,
    ) -> Result<(), SessionError> {
        let same_target = self
            .latest
            .as_ref()
            .is_some_and(|(date, court)| *date == ticket.date && *court == ticket.court);
        if ticket.generation != self.generation || !same_target {
            log::debug!(
                "Dropping availability for {} / {} (generation {}, latest {})",
                ticket.date,
                ticket.court,
                ticket.generation,
                self.generation
            );
            return Err(SessionError::StaleDataDiscarded {
                received: ticket.generation,
                latest: self.generation,
            });
        }
        self.intervals = intervals;
        self.loaded = true;
        Ok(())
    }

    pub fn intervals(&self) -> &[OccupiedInterval] {
        &self.intervals
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
