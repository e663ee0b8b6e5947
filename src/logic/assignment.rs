//! Player → team mapping with per-team capacity.

use crate::models::{Placement, PlayerId, SessionError, TeamPlan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emitted when an assignment brings a team to its capacity.
///
/// Advisory: a UI may move focus to the next team; nothing in the registry depends on it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamFilled {
    pub team: usize,
}

/// Holds every roster player's placement. Team sizes are always counted from the map.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRegistry {
    plan: TeamPlan,
    placements: BTreeMap<PlayerId, Placement>,
}

impl AssignmentRegistry {
    /// All given players start unassigned.
    pub fn new<'a>(plan: TeamPlan, player_ids: impl IntoIterator<Item = &'a PlayerId>) -> Self {
        Self {
            plan,
            placements: player_ids
                .into_iter()
                .map(|id| (id.clone(), Placement::Unassigned))
                .collect(),
        }
    }

    pub fn plan(&self) -> &TeamPlan {
        &self.plan
    }

    /// Add a newly joined player as unassigned. Existing placements are kept.
    pub fn register(&mut self, player_id: PlayerId) {
        self.placements.entry(player_id).or_default();
    }

    /// Fails with `ShortfallOverCapacity` for the first team whose current members exceed
    /// its capacity under `plan` (teams that no longer exist count as capacity zero).
    pub fn check_fits(&self, plan: &TeamPlan) -> Result<(), SessionError> {
        let mut counts = BTreeMap::new();
        for placement in self.placements.values() {
            if let Placement::Team(team) = placement {
                *counts.entry(*team).or_insert(0usize) += 1;
            }
        }
        for (team, members) in counts {
            let capacity = plan.effective_capacity(team).unwrap_or(0);
            if members > capacity {
                return Err(SessionError::ShortfallOverCapacity {
                    team,
                    members,
                    capacity,
                });
            }
        }
        Ok(())
    }

    /// Swap in a new plan, keeping placements. Rejected, with the registry unchanged, if a
    /// team would end up over its new capacity.
    pub fn replan(&mut self, plan: TeamPlan) -> Result<(), SessionError> {
        self.check_fits(&plan)?;
        self.plan = plan;
        Ok(())
    }

    /// Team size changed: every capacity is invalid, so everybody goes back to unassigned.
    pub fn reset(&mut self, plan: TeamPlan) {
        self.plan = plan;
        for placement in self.placements.values_mut() {
            *placement = Placement::Unassigned;
        }
    }

    pub fn placement(&self, player_id: &str) -> Option<Placement> {
        self.placements.get(player_id).copied()
    }

    pub fn placements(&self) -> &BTreeMap<PlayerId, Placement> {
        &self.placements
    }

    pub fn member_count(&self, team: usize) -> usize {
        self.placements
            .values()
            .filter(|p| **p == Placement::Team(team))
            .count()
    }

    pub fn is_full(&self, team: usize) -> bool {
        self.plan
            .effective_capacity(team)
            .is_some_and(|cap| self.member_count(team) >= cap)
    }

    /// Put a player on a team, moving them off any previous team.
    ///
    /// Fails with `TeamFull` if the target is at capacity; the registry is then unchanged.
    /// Returns [`TeamFilled`] when this assignment fills the team.
    pub fn assign(
        &mut self,
        player_id: &str,
        team: usize,
    ) -> Result<Option<TeamFilled>, SessionError> {
        let capacity = self
            .plan
            .effective_capacity(team)
            .ok_or(SessionError::TeamOutOfRange {
                team,
                team_count: self.plan.team_count,
            })?;
        let current = self
            .placements
            .get(player_id)
            .copied()
            .ok_or_else(|| SessionError::PlayerNotFound(player_id.to_string()))?;
        if current == Placement::Team(team) {
            return Ok(None);
        }
        // The player is not on `team`, so the count excludes them.
        if self.member_count(team) >= capacity {
            return Err(SessionError::TeamFull { team, capacity });
        }
        // One map write moves the player; the old team's count drops as the new one rises.
        if let Some(slot) = self.placements.get_mut(player_id) {
            *slot = Placement::Team(team);
        }
        if self.member_count(team) == capacity {
            log::debug!("Team {} filled ({} players)", team + 1, capacity);
            return Ok(Some(TeamFilled { team }));
        }
        Ok(None)
    }

    pub fn unassign(&mut self, player_id: &str) -> Result<(), SessionError> {
        let slot = self
            .placements
            .get_mut(player_id)
            .ok_or_else(|| SessionError::PlayerNotFound(player_id.to_string()))?;
        *slot = Placement::Unassigned;
        Ok(())
    }

    pub fn unassigned_count(&self) -> usize {
        self.placements
            .values()
            .filter(|p| **p == Placement::Unassigned)
            .count()
    }
}
