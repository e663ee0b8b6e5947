//! Team capacity planning: how many teams, and what to do with leftover players.

use crate::models::{CapacityPolicy, SessionError, ShortfallResolution, TeamPlan};

/// Divide `total_players` into teams of `per_team`.
///
/// Leftover 0 → `Exact`; 1-2 → `Rotate`; 3 or more → `RequiresDecision` with
/// `needed = per_team - leftover`. Team count is rounded up whenever there is a leftover.
pub fn plan_teams(total_players: usize, per_team: usize) -> Result<TeamPlan, SessionError> {
    if per_team == 0 {
        return Err(SessionError::InvalidTeamSize);
    }
    let leftover = total_players % per_team;
    let team_count = total_players.div_ceil(per_team);
    let policy = match leftover {
        0 => CapacityPolicy::Exact,
        1..=2 => CapacityPolicy::Rotate,
        _ => CapacityPolicy::RequiresDecision {
            needed: per_team - leftover,
        },
    };
    Ok(TeamPlan {
        total_players,
        per_team,
        team_count,
        leftover,
        policy,
    })
}

/// Apply the caller's shortfall decision to a plan in `RequiresDecision`.
///
/// `FillWithTemp` grows the roster by `needed` (the caller creates those players) and yields
/// an `Exact` plan. `AcceptShortfall` keeps the roster and shrinks the last team.
pub fn resolve_shortfall(
    plan: &TeamPlan,
    resolution: ShortfallResolution,
) -> Result<TeamPlan, SessionError> {
    let needed = match plan.policy {
        CapacityPolicy::RequiresDecision { needed } => needed,
        _ => return Err(SessionError::NoDecisionPending),
    };
    match resolution {
        ShortfallResolution::FillWithTemp => plan_teams(plan.total_players + needed, plan.per_team),
        ShortfallResolution::AcceptShortfall => Ok(TeamPlan {
            policy: CapacityPolicy::UnderstaffedLast { needed },
            ..*plan
        }),
    }
}
