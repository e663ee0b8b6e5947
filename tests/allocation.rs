//! Integration tests for team planning, assignment, setter quota and temporary players.

use court_session_web::{
    max_setters, plan_teams, resolve_shortfall, AllocationSession, AssignmentRegistry,
    CapacityPolicy, ErrorKind, Placement, Player, SessionError, ShortfallResolution,
    TempIdAllocator, MAX_ID_ATTEMPTS,
};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("p{i}"), format!("Player {i}"))).collect()
}

fn seeded_ids() -> TempIdAllocator<StdRng> {
    TempIdAllocator::new(StdRng::seed_from_u64(7))
}

#[test]
fn even_roster_is_exact() {
    let plan = plan_teams(12, 6).unwrap();
    assert_eq!(plan.team_count, 2);
    assert_eq!(plan.leftover, 0);
    assert_eq!(plan.policy, CapacityPolicy::Exact);
}

#[test]
fn two_leftover_players_rotate() {
    let plan = plan_teams(17, 5).unwrap();
    assert_eq!(plan.leftover, 2);
    assert_eq!(plan.policy, CapacityPolicy::Rotate);
    assert_eq!(plan.team_count, 4);
}

#[test]
fn four_leftover_players_need_a_decision() {
    let plan = plan_teams(19, 5).unwrap();
    assert_eq!(plan.leftover, 4);
    assert_eq!(plan.policy, CapacityPolicy::RequiresDecision { needed: 1 });

    let filled = resolve_shortfall(&plan, ShortfallResolution::FillWithTemp).unwrap();
    assert_eq!(filled.total_players, 20);
    assert_eq!(filled.policy, CapacityPolicy::Exact);
    assert_eq!(filled.team_count, 4);

    let short = resolve_shortfall(&plan, ShortfallResolution::AcceptShortfall).unwrap();
    assert_eq!(short.policy, CapacityPolicy::UnderstaffedLast { needed: 1 });
    assert_eq!(short.effective_capacity(3), Some(4));
    assert_eq!(short.effective_capacity(0), Some(5));
    assert_eq!(short.effective_capacity(4), None);
}

#[test]
fn zero_team_size_is_rejected() {
    assert_eq!(plan_teams(10, 0), Err(SessionError::InvalidTeamSize));
}

#[test]
fn resolving_without_pending_decision_fails() {
    let plan = plan_teams(10, 5).unwrap();
    assert_eq!(
        resolve_shortfall(&plan, ShortfallResolution::AcceptShortfall),
        Err(SessionError::NoDecisionPending)
    );
}

#[test]
fn assigning_to_full_team_leaves_state_unchanged() {
    let players = roster(4);
    let plan = plan_teams(4, 2).unwrap();
    let mut registry = AssignmentRegistry::new(plan, players.iter().map(|p| &p.id));
    registry.assign("p0", 0).unwrap();
    registry.assign("p1", 0).unwrap();
    registry.assign("p2", 1).unwrap();

    let before = registry.clone();
    let err = registry.assign("p2", 0).unwrap_err();
    assert_eq!(err, SessionError::TeamFull { team: 0, capacity: 2 });
    assert_eq!(err.kind(), ErrorKind::TeamFull);
    assert_eq!(registry, before);
    assert_eq!(
        serde_json::to_string(&registry).unwrap(),
        serde_json::to_string(&before).unwrap()
    );
}

#[test]
fn reassignment_moves_player_without_double_counting() {
    let players = roster(4);
    let plan = plan_teams(4, 2).unwrap();
    let mut registry = AssignmentRegistry::new(plan, players.iter().map(|p| &p.id));
    registry.assign("p0", 0).unwrap();
    registry.assign("p0", 1).unwrap();
    assert_eq!(registry.member_count(0), 0);
    assert_eq!(registry.member_count(1), 1);
    assert_eq!(registry.placement("p0"), Some(Placement::Team(1)));

    registry.unassign("p0").unwrap();
    assert_eq!(registry.placement("p0"), Some(Placement::Unassigned));
    assert_eq!(registry.unassigned_count(), 4);
}

#[test]
fn filling_a_team_emits_team_filled() {
    let players = roster(4);
    let plan = plan_teams(4, 2).unwrap();
    let mut registry = AssignmentRegistry::new(plan, players.iter().map(|p| &p.id));
    assert_eq!(registry.assign("p0", 1).unwrap(), None);
    let event = registry.assign("p1", 1).unwrap();
    assert_eq!(event.map(|e| e.team), Some(1));
    assert!(registry.is_full(1));
    // Re-assigning to the same team is a no-op, no second event.
    assert_eq!(registry.assign("p1", 1).unwrap(), None);
}

#[test]
fn unknown_player_and_team_are_validation_errors() {
    let players = roster(2);
    let plan = plan_teams(2, 2).unwrap();
    let mut registry = AssignmentRegistry::new(plan, players.iter().map(|p| &p.id));
    assert_eq!(
        registry.assign("ghost", 0),
        Err(SessionError::PlayerNotFound("ghost".to_string()))
    );
    assert_eq!(
        registry.assign("p0", 3),
        Err(SessionError::TeamOutOfRange { team: 3, team_count: 1 })
    );
}

#[test]
fn setter_cap_is_roster_wide() {
    assert_eq!(max_setters(6, 12), 2);
    assert_eq!(max_setters(0, 12), 0);

    let mut session = AllocationSession::new(roster(12), 6).unwrap();
    session.set_setter("p0", true).unwrap();
    session.set_setter("p1", true).unwrap();
    let err = session.set_setter("p2", true).unwrap_err();
    assert_eq!(err, SessionError::SetterQuotaExceeded { max: 2 });
    assert_eq!(session.roles().count(), 2);

    // Re-flagging is a no-op; unflagging always works and frees a slot.
    session.set_setter("p0", true).unwrap();
    session.set_setter("p0", false).unwrap();
    session.set_setter("p2", true).unwrap();
    assert!(session.roles().is_setter("p2"));
}

#[test]
fn changing_team_size_clears_assignments_and_roles() {
    let mut session = AllocationSession::new(roster(12), 6).unwrap();
    session.assign_player("p0", 0).unwrap();
    session.assign_player("p1", 1).unwrap();
    session.set_setter("p0", true).unwrap();

    let plan = *session.set_team_size(4).unwrap();
    assert_eq!(plan.team_count, 3);
    assert!(session
        .registry()
        .placements()
        .values()
        .all(|p| *p == Placement::Unassigned));
    assert_eq!(session.roles().count(), 0);
    assert_eq!(session.roles().max(), 3);
}

#[test]
fn pending_decision_blocks_assignment_and_finalize() {
    let mut session = AllocationSession::new(roster(19), 5).unwrap();
    assert_eq!(
        session.assign_player("p0", 0),
        Err(SessionError::DecisionRequired { needed: 1 })
    );
    assert!(session.finalize().is_err());

    session
        .resolve_shortfall(ShortfallResolution::AcceptShortfall, &mut seeded_ids())
        .unwrap();
    for i in 0..4 {
        session.assign_player(&format!("p{i}"), 3).unwrap();
    }
    assert_eq!(
        session.assign_player("p4", 3),
        Err(SessionError::TeamFull { team: 3, capacity: 4 })
    );
}

#[test]
fn fill_with_temp_adds_unique_temporary_players() {
    let mut session = AllocationSession::new(roster(17), 5).unwrap();
    assert_eq!(session.plan().policy, CapacityPolicy::Rotate);
    session.set_team_size(6).unwrap();
    assert_eq!(session.plan().policy, CapacityPolicy::RequiresDecision { needed: 1 });

    let added = session
        .resolve_shortfall(ShortfallResolution::FillWithTemp, &mut seeded_ids())
        .unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(session.players().len(), 18);
    assert_eq!(session.plan().policy, CapacityPolicy::Exact);
    assert_eq!(session.plan().team_count, 3);

    let temp = session.players().iter().find(|p| p.id == added[0]).unwrap();
    assert!(temp.temporary);
    assert!(temp.id.starts_with("temp-"));
    assert_eq!(session.registry().placement(&temp.id), Some(Placement::Unassigned));
    assert_eq!(session.roles().max(), 3);
}

#[test]
fn temp_ids_retry_past_collisions() {
    // StepRng(0, 1) yields 0, 1, 2, ...: the first two candidates are taken.
    let taken: HashSet<String> = ["temp-000000", "temp-000001"].map(String::from).into();
    let mut ids = TempIdAllocator::new(StepRng::new(0, 1));
    assert_eq!(ids.allocate(&taken).unwrap(), "temp-000002");
}

#[test]
fn temp_ids_give_up_after_bounded_attempts() {
    // A constant source always collides.
    let taken: HashSet<String> = ["temp-000000".to_string()].into();
    let mut ids = TempIdAllocator::new(StepRng::new(0, 0));
    let err = ids.allocate(&taken).unwrap_err();
    assert_eq!(err, SessionError::UniqueIdGenerationFailure { attempts: MAX_ID_ATTEMPTS });
    assert_eq!(err.kind(), ErrorKind::UniqueIdGenerationFailure);
}

#[test]
fn failed_fill_changes_nothing() {
    let mut session = AllocationSession::new(roster(8), 5).unwrap();
    let mut ids = TempIdAllocator::with_max_attempts(StepRng::new(0, 0), 3);
    // Needs 2 players but a constant source only ever yields one fresh id.
    let err = session
        .resolve_shortfall(ShortfallResolution::FillWithTemp, &mut ids)
        .unwrap_err();
    assert_eq!(err, SessionError::UniqueIdGenerationFailure { attempts: 3 });
    assert_eq!(session.players().len(), 8);
    assert_eq!(session.plan().policy, CapacityPolicy::RequiresDecision { needed: 2 });
}

#[test]
fn temp_ids_never_clash_with_permanent_ids() {
    let mut players = roster(3);
    players.push(Player::new("temp-000000", "Looks temporary"));
    let mut session = AllocationSession::new(players, 2).unwrap();
    let mut ids = TempIdAllocator::new(StepRng::new(0, 1));
    let id = session.add_temporary_player(&mut ids).unwrap();
    assert_eq!(id, "temp-000001");
    assert_eq!(session.players().len(), 5);
    assert_eq!(session.plan().team_count, 3);
}

#[test]
fn duplicate_roster_ids_are_rejected() {
    let players = vec![Player::new("a", "A"), Player::new("a", "A again")];
    assert_eq!(
        AllocationSession::new(players, 2).unwrap_err(),
        SessionError::DuplicatePlayer("a".to_string())
    );
}

#[test]
fn finalize_lists_teams_and_setters() {
    let mut session = AllocationSession::new(roster(4), 2).unwrap();
    session.assign_player("p3", 0).unwrap();
    session.assign_player("p0", 0).unwrap();
    session.assign_player("p1", 1).unwrap();
    session.set_setter("p1", true).unwrap();

    let submission = session.finalize().unwrap();
    assert_eq!(submission.teams.len(), 2);
    // Roster order, not assignment order.
    assert_eq!(submission.teams[0].member_ids, ["p0", "p3"]);
    assert_eq!(submission.teams[1].member_ids, ["p1"]);
    assert_eq!(submission.role_flags, ["p1"]);
}

#[test]
fn accepting_shortfall_cannot_shrink_an_overfull_last_team() {
    // 6 of 5 rotates over two full-size teams; fill the last one completely.
    let mut session = AllocationSession::new(roster(6), 5).unwrap();
    assert_eq!(session.plan().policy, CapacityPolicy::Rotate);
    for i in 0..5 {
        session.assign_player(&format!("p{i}"), 1).unwrap();
    }

    let mut ids = TempIdAllocator::new(StepRng::new(0, 1));
    session.add_temporary_player(&mut ids).unwrap();
    session.add_temporary_player(&mut ids).unwrap();
    assert_eq!(session.plan().policy, CapacityPolicy::RequiresDecision { needed: 2 });

    let before = session.registry().clone();
    let err = session
        .resolve_shortfall(ShortfallResolution::AcceptShortfall, &mut ids)
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::ShortfallOverCapacity {
            team: 1,
            members: 5,
            capacity: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(session.registry(), &before);
    assert_eq!(session.plan().policy, CapacityPolicy::RequiresDecision { needed: 2 });

    // Making room lets the shortfall through.
    session.unassign_player("p0").unwrap();
    session.unassign_player("p1").unwrap();
    session
        .resolve_shortfall(ShortfallResolution::AcceptShortfall, &mut ids)
        .unwrap();
    assert_eq!(session.plan().policy, CapacityPolicy::UnderstaffedLast { needed: 2 });
    assert!(session
        .teams()
        .iter()
        .all(|t| t.member_ids.len() <= t.effective_capacity));
}
