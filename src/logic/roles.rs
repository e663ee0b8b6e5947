//! Roster-wide cap on setters.

use crate::models::{PlayerId, SessionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One setter per full team: `floor(total_players / team_size)`, shared across the roster.
pub fn max_setters(team_size: usize, total_players: usize) -> usize {
    if team_size == 0 {
        return 0;
    }
    total_players / team_size
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoleQuota {
    max: usize,
    setters: BTreeSet<PlayerId>,
}

impl RoleQuota {
    pub fn new(team_size: usize, total_players: usize) -> Self {
        Self {
            max: max_setters(team_size, total_players),
            setters: BTreeSet::new(),
        }
    }

    /// Team size changed: new cap, every flag cleared.
    pub fn reset(&mut self, team_size: usize, total_players: usize) {
        self.max = max_setters(team_size, total_players);
        self.setters.clear();
    }

    /// Roster grew: cap may rise, flags stay.
    pub fn recompute(&mut self, team_size: usize, total_players: usize) {
        self.max = max_setters(team_size, total_players);
    }

    /// Flag or unflag a player. Flagging fails when the cap is already reached.
    pub fn set_role(&mut self, player_id: &str, setter: bool) -> Result<(), SessionError> {
        if !setter {
            self.setters.remove(player_id);
            return Ok(());
        }
        if self.setters.contains(player_id) {
            return Ok(());
        }
        if self.setters.len() >= self.max {
            return Err(SessionError::SetterQuotaExceeded { max: self.max });
        }
        self.setters.insert(player_id.to_string());
        Ok(())
    }

    pub fn is_setter(&self, player_id: &str) -> bool {
        self.setters.contains(player_id)
    }

    pub fn count(&self) -> usize {
        self.setters.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn setters(&self) -> impl Iterator<Item = &PlayerId> {
        self.setters.iter()
    }
}
