//! Team plan, placements and the roster handoff.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How leftover players (roster size mod team size) are handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Roster divides evenly into full teams.
    Exact,
    /// One or two leftover players may rotate through formed teams. Advisory only.
    Rotate,
    /// Three or more leftover players: the caller must pick a [`ShortfallResolution`].
    RequiresDecision { needed: usize },
    /// Shortfall accepted: the last team plays with `needed` fewer players.
    UnderstaffedLast { needed: usize },
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityPolicy::Exact => write!(f, "exact"),
            CapacityPolicy::Rotate => write!(f, "rotate"),
            CapacityPolicy::RequiresDecision { .. } => write!(f, "requires-decision"),
            CapacityPolicy::UnderstaffedLast { .. } => write!(f, "understaffed-last"),
        }
    }
}

/// Caller's answer to [`CapacityPolicy::RequiresDecision`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallResolution {
    /// Synthesize the missing players as temporary entries.
    FillWithTemp,
    /// Keep the roster; the last team runs short.
    AcceptShortfall,
}

/// Result of dividing a roster into teams.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamPlan {
    pub total_players: usize,
    pub per_team: usize,
    pub team_count: usize,
    pub leftover: usize,
    pub policy: CapacityPolicy,
}

impl TeamPlan {
    /// Maximum members of the given team; `None` if the team does not exist.
    pub fn effective_capacity(&self, team: usize) -> Option<usize> {
        if team >= self.team_count {
            return None;
        }
        match self.policy {
            CapacityPolicy::UnderstaffedLast { needed } if team + 1 == self.team_count => {
                Some(self.per_team - needed)
            }
            _ => Some(self.per_team),
        }
    }

    /// Players missing from the last team (pending or accepted); zero otherwise.
    pub fn shortfall(&self) -> usize {
        match self.policy {
            CapacityPolicy::RequiresDecision { needed }
            | CapacityPolicy::UnderstaffedLast { needed } => needed,
            CapacityPolicy::Exact | CapacityPolicy::Rotate => 0,
        }
    }
}

/// Where a player currently sits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Zero-based team index.
    Team(usize),
    #[default]
    Unassigned,
}

/// A team view: capacity plus members in roster order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub index: usize,
    pub effective_capacity: usize,
    pub member_ids: Vec<PlayerId>,
}

/// One team in the finalized roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub index: usize,
    pub member_ids: Vec<PlayerId>,
}

/// Finalized roster, handed to the external game-session endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterSubmission {
    pub teams: Vec<TeamRoster>,
    /// Players flagged as setter.
    pub role_flags: Vec<PlayerId>,
}
