//! Manual team allocation workflow: plan, resolve shortfall, assign, flag setters, export.

use crate::logic::assignment::{AssignmentRegistry, TeamFilled};
use crate::logic::capacity::{plan_teams, resolve_shortfall};
use crate::logic::organizer::{self, TeamGroup};
use crate::logic::roles::RoleQuota;
use crate::logic::temp_ids::TempIdAllocator;
use crate::models::{
    CapacityPolicy, Placement, Player, PlayerId, RosterSubmission, SessionError, SessionId,
    ShortfallResolution, Team, TeamPlan, TeamRoster,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One organizer's allocation workflow over a roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationSession {
    pub id: SessionId,
    players: Vec<Player>,
    team_size: usize,
    registry: AssignmentRegistry,
    roles: RoleQuota,
}

impl AllocationSession {
    /// Start with every player unassigned. Player ids must be unique.
    pub fn new(players: Vec<Player>, team_size: usize) -> Result<Self, SessionError> {
        let mut seen = HashSet::new();
        for p in &players {
            if !seen.insert(p.id.as_str()) {
                return Err(SessionError::DuplicatePlayer(p.id.clone()));
            }
        }
        let plan = plan_teams(players.len(), team_size)?;
        let registry = AssignmentRegistry::new(plan, players.iter().map(|p| &p.id));
        Ok(Self {
            id: Uuid::new_v4(),
            roles: RoleQuota::new(team_size, players.len()),
            players,
            team_size,
            registry,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn plan(&self) -> &TeamPlan {
        self.registry.plan()
    }

    pub fn registry(&self) -> &AssignmentRegistry {
        &self.registry
    }

    pub fn roles(&self) -> &RoleQuota {
        &self.roles
    }

    /// Change team size. All placements and setter flags are cleared.
    pub fn set_team_size(&mut self, team_size: usize) -> Result<&TeamPlan, SessionError> {
        let plan = plan_teams(self.players.len(), team_size)?;
        self.team_size = team_size;
        self.registry.reset(plan);
        self.roles.reset(team_size, self.players.len());
        log::debug!(
            "Team size set to {}: {} team(s), policy {}",
            team_size,
            plan.team_count,
            plan.policy
        );
        Ok(self.registry.plan())
    }

    /// Answer a pending shortfall. `FillWithTemp` adds the missing players as temporary
    /// entries; either all of them are created or none.
    ///
    /// `AcceptShortfall` shrinks the last team. If that team already holds more players
    /// than it may keep (placed while the roster was smaller), the call fails with
    /// `ShortfallOverCapacity` and nothing changes.
    pub fn resolve_shortfall<R: RngCore>(
        &mut self,
        resolution: ShortfallResolution,
        ids: &mut TempIdAllocator<R>,
    ) -> Result<Vec<PlayerId>, SessionError> {
        let plan = resolve_shortfall(self.registry.plan(), resolution)?;
        self.registry.check_fits(&plan)?;
        let mut added = Vec::new();
        if resolution == ShortfallResolution::FillWithTemp {
            let needed = plan.total_players - self.players.len();
            let new_players = self.draw_temporary_players(needed, ids)?;
            added = new_players.iter().map(|p| p.id.clone()).collect();
            for p in new_players {
                self.registry.register(p.id.clone());
                self.players.push(p);
            }
        }
        self.registry.replan(plan)?;
        self.roles.recompute(self.team_size, self.players.len());
        Ok(added)
    }

    /// Add one temporary player and re-plan.
    ///
    /// The new plan is never understaffed, so every team keeps at least its old capacity.
    /// It may however ask for a shortfall decision again; accepting that one is checked
    /// against the players already placed.
    pub fn add_temporary_player<R: RngCore>(
        &mut self,
        ids: &mut TempIdAllocator<R>,
    ) -> Result<PlayerId, SessionError> {
        let plan = plan_teams(self.players.len() + 1, self.team_size)?;
        self.registry.check_fits(&plan)?;
        let mut drawn = self.draw_temporary_players(1, ids)?;
        let player = drawn.remove(0);
        let id = player.id.clone();
        self.registry.register(id.clone());
        self.players.push(player);
        self.registry.replan(plan)?;
        self.roles.recompute(self.team_size, self.players.len());
        Ok(id)
    }

    fn draw_temporary_players<R: RngCore>(
        &self,
        count: usize,
        ids: &mut TempIdAllocator<R>,
    ) -> Result<Vec<Player>, SessionError> {
        let mut taken: HashSet<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        let mut next_number = self.players.iter().filter(|p| p.temporary).count() + 1;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let id = ids.allocate(&taken)?;
            taken.insert(id.clone());
            out.push(Player::temporary(id, format!("Guest {}", next_number)));
            next_number += 1;
        }
        Ok(out)
    }

    fn ensure_decided(&self) -> Result<(), SessionError> {
        match self.registry.plan().policy {
            CapacityPolicy::RequiresDecision { needed } => {
                Err(SessionError::DecisionRequired { needed })
            }
            _ => Ok(()),
        }
    }

    /// Put a player on a team (zero-based). Returns the advisory [`TeamFilled`] event.
    pub fn assign_player(
        &mut self,
        player_id: &str,
        team: usize,
    ) -> Result<Option<TeamFilled>, SessionError> {
        self.ensure_decided()?;
        self.registry.assign(player_id, team)
    }

    pub fn unassign_player(&mut self, player_id: &str) -> Result<(), SessionError> {
        self.registry.unassign(player_id)
    }

    /// Flag or unflag a player as setter, within the roster-wide cap.
    pub fn set_setter(&mut self, player_id: &str, setter: bool) -> Result<(), SessionError> {
        if !self.players.iter().any(|p| p.id == player_id) {
            return Err(SessionError::PlayerNotFound(player_id.to_string()));
        }
        self.roles.set_role(player_id, setter)
    }

    /// Current teams with members in roster order.
    pub fn teams(&self) -> Vec<Team> {
        self.organize()
            .into_iter()
            .filter_map(|g| match (g.placement, g.capacity) {
                (Placement::Team(index), Some(effective_capacity)) => Some(Team {
                    index,
                    effective_capacity,
                    member_ids: g.members.into_iter().map(|p| p.id).collect(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn organize(&self) -> Vec<TeamGroup> {
        organizer::organize(&self.players, &self.registry)
    }

    pub fn export(&self) -> String {
        organizer::export(&self.organize(), self.registry.plan(), &self.roles)
    }

    /// Build the game-session handoff. A pending shortfall decision must be resolved first.
    pub fn finalize(&self) -> Result<RosterSubmission, SessionError> {
        self.ensure_decided()?;
        let teams = self
            .teams()
            .into_iter()
            .map(|t| TeamRoster {
                index: t.index,
                member_ids: t.member_ids,
            })
            .collect();
        let role_flags = self
            .players
            .iter()
            .filter(|p| self.roles.is_setter(&p.id))
            .map(|p| p.id.clone())
            .collect();
        Ok(RosterSubmission { teams, role_flags })
    }
}
