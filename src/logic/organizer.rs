//! Group the manual assignment by team and render a plain-text roster.

use crate::logic::assignment::AssignmentRegistry;
use crate::logic::roles::RoleQuota;
use crate::models::{Placement, Player, TeamPlan};
use std::fmt::Write;

const SUMMARY_PREFIX: &str = "Summary:";
const SHORTFALL_KEY: &str = "shortfall:";

/// Members of one team (or of the unassigned pool), in roster order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeamGroup {
    pub placement: Placement,
    /// `None` for the unassigned pool.
    pub capacity: Option<usize>,
    pub members: Vec<Player>,
}

/// One group per planned team in ascending order, empty teams included, then the
/// unassigned players if there are any.
pub fn organize(players: &[Player], registry: &AssignmentRegistry) -> Vec<TeamGroup> {
    let plan = registry.plan();
    let mut groups: Vec<TeamGroup> = (0..plan.team_count)
        .map(|team| TeamGroup {
            placement: Placement::Team(team),
            capacity: plan.effective_capacity(team),
            members: Vec::new(),
        })
        .collect();
    let mut unassigned = Vec::new();
    for p in players {
        match registry.placement(&p.id).unwrap_or_default() {
            Placement::Team(team) if team < groups.len() => groups[team].members.push(p.clone()),
            _ => unassigned.push(p.clone()),
        }
    }
    if !unassigned.is_empty() {
        groups.push(TeamGroup {
            placement: Placement::Unassigned,
            capacity: None,
            members: unassigned,
        });
    }
    groups
}

/// Text listing: a header per group, one line per member with `[temp]` / `[setter]`
/// markers, and a final summary line.
pub fn export(groups: &[TeamGroup], plan: &TeamPlan, roles: &RoleQuota) -> String {
    let mut out = String::new();
    for group in groups {
        match (group.placement, group.capacity) {
            (Placement::Team(team), Some(cap)) => {
                let _ = writeln!(out, "Team {} ({}/{})", team + 1, group.members.len(), cap);
            }
            _ => {
                let _ = writeln!(out, "Unassigned ({})", group.members.len());
            }
        }
        for p in &group.members {
            let mut line = format!("  - {}", p.name);
            if p.temporary {
                line.push_str(" [temp]");
            }
            if roles.is_setter(&p.id) {
                line.push_str(" [setter]");
            }
            let _ = writeln!(out, "{}", line);
        }
    }
    let _ = writeln!(
        out,
        "{} {} teams of {} | policy: {} | leftover: {} | {} {}",
        SUMMARY_PREFIX,
        plan.team_count,
        plan.per_team,
        plan.policy,
        plan.leftover,
        SHORTFALL_KEY,
        plan.shortfall()
    );
    out
}

/// Read the shortfall count back from an exported listing's summary line.
pub fn parse_summary_shortfall(text: &str) -> Option<usize> {
    let summary = text.lines().find(|l| l.starts_with(SUMMARY_PREFIX))?;
    summary
        .split('|')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(SHORTFALL_KEY))
        .and_then(|n| n.trim().parse().ok())
}
