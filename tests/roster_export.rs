//! Integration tests for grouping the manual assignment and exporting it as text.

use court_session_web::{
    parse_summary_shortfall, plan_teams, AllocationSession, Placement, Player,
    ShortfallResolution, TempIdAllocator,
};
use rand::rngs::mock::StepRng;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("p{i}"), format!("Player {i}"))).collect()
}

fn assign_in_order(session: &mut AllocationSession) {
    let per_team = session.team_size();
    let ids: Vec<String> = session.players().iter().map(|p| p.id.clone()).collect();
    for (i, id) in ids.iter().enumerate() {
        session.assign_player(id, i / per_team).unwrap();
    }
}

#[test]
fn groups_follow_team_index_with_unassigned_last() {
    let mut session = AllocationSession::new(roster(6), 3).unwrap();
    session.assign_player("p4", 1).unwrap();
    session.assign_player("p1", 0).unwrap();
    session.assign_player("p2", 1).unwrap();

    let groups = session.organize();
    let layout: Vec<(Placement, Vec<&str>)> = groups
        .iter()
        .map(|g| (g.placement, g.members.iter().map(|p| p.id.as_str()).collect()))
        .collect();
    assert_eq!(
        layout,
        vec![
            (Placement::Team(0), vec!["p1"]),
            (Placement::Team(1), vec!["p2", "p4"]),
            (Placement::Unassigned, vec!["p0", "p3", "p5"]),
        ]
    );
}

#[test]
fn empty_teams_still_get_a_section() {
    let session = AllocationSession::new(roster(4), 2).unwrap();
    let text = session.export();
    assert!(text.contains("Team 1 (0/2)"));
    assert!(text.contains("Team 2 (0/2)"));
    assert!(text.contains("Unassigned (4)"));
}

#[test]
fn full_roster_exports_one_section_per_team_and_a_summary() {
    let mut session = AllocationSession::new(roster(15), 5).unwrap();
    assign_in_order(&mut session);
    session.set_setter("p0", true).unwrap();

    let text = session.export();
    let headers = text.lines().filter(|l| l.starts_with("Team ")).count();
    let summaries = text.lines().filter(|l| l.starts_with("Summary:")).count();
    assert_eq!(headers, 3);
    assert_eq!(summaries, 1);
    assert!(!text.contains("Unassigned"));
    assert!(text.contains("  - Player 0 [setter]"));
    assert_eq!(
        text.lines().last().unwrap(),
        "Summary: 3 teams of 5 | policy: exact | leftover: 0 | shortfall: 0"
    );
}

#[test]
fn summary_shortfall_matches_the_plan() {
    let mut session = AllocationSession::new(roster(13), 5).unwrap();
    let expected = plan_teams(13, 5).unwrap();
    assert_eq!(expected.shortfall(), 2);

    let mut ids = TempIdAllocator::new(StepRng::new(0, 1));
    session
        .resolve_shortfall(ShortfallResolution::AcceptShortfall, &mut ids)
        .unwrap();
    assign_in_order(&mut session);

    let text = session.export();
    assert_eq!(text.lines().filter(|l| l.starts_with("Team ")).count(), 3);
    assert!(text.contains("Team 3 (3/3)"));
    assert!(text.contains("policy: understaffed-last"));
    assert_eq!(parse_summary_shortfall(&text), Some(expected.shortfall()));
}

#[test]
fn temporary_players_are_marked() {
    let mut session = AllocationSession::new(roster(3), 2).unwrap();
    let mut ids = TempIdAllocator::new(StepRng::new(0, 1));
    session.add_temporary_player(&mut ids).unwrap();
    assign_in_order(&mut session);

    let text = session.export();
    assert!(text.contains("  - Guest 1 [temp]"));
    assert_eq!(parse_summary_shortfall(&text), Some(0));
}

#[test]
fn parse_summary_needs_a_summary_line() {
    assert_eq!(parse_summary_shortfall("Team 1 (0/2)\n"), None);
}
