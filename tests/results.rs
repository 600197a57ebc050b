//! Integration tests for result recording and winner advancement.

use interclass_tournament_web::{
    advance_winner, coerce_score, generate_bracket, record_result, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use uuid::Uuid;

fn roster(n: usize) -> Tournament {
    let mut t = Tournament::new();
    for i in 0..n {
        t.add_team(format!("Team {i}"), format!("Coach {i}"), Vec::new())
            .unwrap();
    }
    t
}

/// Roster with a generated bracket (seeded so tests are reproducible).
fn ready(n: usize) -> Tournament {
    let mut t = roster(n);
    generate_bracket(&mut t, &mut StdRng::seed_from_u64(7)).unwrap();
    t
}

#[test]
fn unknown_match_id_is_rejected() {
    let mut t = ready(4);
    let missing = Uuid::new_v4();
    assert_eq!(
        record_result(&mut t, missing, 1, 0),
        Err(TournamentError::MatchNotFound(missing))
    );
    assert!(t.results.is_empty());
}

#[test]
fn recording_without_a_bracket_is_rejected() {
    let mut t = roster(4);
    assert_eq!(
        record_result(&mut t, Uuid::new_v4(), 1, 0),
        Err(TournamentError::BracketNotGenerated)
    );
}

#[test]
fn recording_sets_winner_and_advances_into_the_matching_slot() {
    let mut t = ready(4);
    let m = t
        .bracket
        .as_ref()
        .unwrap()
        .iter()
        .find(|m| m.round == 1)
        .unwrap()
        .clone();

    record_result(&mut t, m.id, 3, 1).unwrap();
    assert_eq!(t.results[&m.id].winner_team_id, m.team_a);

    let next = t.get_match(m.next_match_id.unwrap()).unwrap();
    if next.prev_match_a == Some(m.id) {
        assert_eq!(next.team_a, m.team_a);
        assert_eq!(next.team_b, None);
    } else {
        assert_eq!(next.prev_match_b, Some(m.id));
        assert_eq!(next.team_b, m.team_a);
        assert_eq!(next.team_a, None);
    }
}

#[test]
fn tie_stores_no_winner_and_does_not_advance() {
    let mut t = ready(4);
    let m = t
        .bracket
        .as_ref()
        .unwrap()
        .iter()
        .find(|m| m.round == 1)
        .unwrap()
        .clone();

    record_result(&mut t, m.id, 2, 2).unwrap();
    assert_eq!(t.results[&m.id].winner_team_id, None);

    let next = t.get_match(m.next_match_id.unwrap()).unwrap();
    assert!(next.team_a.is_none() && next.team_b.is_none());
}

#[test]
fn recording_the_same_result_twice_changes_nothing() {
    let mut t = ready(4);
    let m_id = t.bracket.as_ref().unwrap()[0].id;

    record_result(&mut t, m_id, 3, 1).unwrap();
    let bracket_after = t.bracket.clone();
    let results_after = t.results.clone();

    record_result(&mut t, m_id, 3, 1).unwrap();
    assert_eq!(t.bracket, bracket_after);
    assert_eq!(t.results, results_after);

    // Re-running advancement alone is just as idempotent.
    advance_winner(&mut t, m_id);
    assert_eq!(t.bracket, bracket_after);
}

#[test]
fn changed_result_overwrites_the_next_round_slot() {
    let mut t = ready(4);
    let m = t
        .bracket
        .as_ref()
        .unwrap()
        .iter()
        .find(|m| m.round == 1)
        .unwrap()
        .clone();

    record_result(&mut t, m.id, 3, 1).unwrap();
    record_result(&mut t, m.id, 0, 4).unwrap();

    let next = t.get_match(m.next_match_id.unwrap()).unwrap();
    let slot = if next.prev_match_a == Some(m.id) {
        next.team_a
    } else {
        next.team_b
    };
    assert_eq!(slot, m.team_b);
}

#[test]
fn final_match_result_is_recorded_but_advances_nowhere() {
    let mut t = ready(2);
    let fin = t.final_match().unwrap().clone();
    assert_eq!(fin.round, 1);

    record_result(&mut t, fin.id, 5, 3).unwrap();
    assert_eq!(t.results[&fin.id].winner_team_id, fin.team_a);
}

#[test]
fn bye_match_resolves_manually_for_the_present_team() {
    let mut t = ready(3);
    let bye = t
        .bracket
        .as_ref()
        .unwrap()
        .iter()
        .find(|m| m.round == 1 && m.team_b.is_none())
        .unwrap()
        .clone();

    record_result(&mut t, bye.id, 1, 0).unwrap();
    assert_eq!(t.results[&bye.id].winner_team_id, bye.team_a);

    let next = t.get_match(bye.next_match_id.unwrap()).unwrap();
    assert!(next.team_a == bye.team_a || next.team_b == bye.team_a);
}

#[test]
fn bye_match_scores_favouring_the_empty_slot_yield_no_winner() {
    let mut t = ready(3);
    let bye = t
        .bracket
        .as_ref()
        .unwrap()
        .iter()
        .find(|m| m.round == 1 && m.team_b.is_none())
        .unwrap()
        .clone();

    record_result(&mut t, bye.id, 0, 2).unwrap();
    assert_eq!(t.results[&bye.id].winner_team_id, None);

    let next = t.get_match(bye.next_match_id.unwrap()).unwrap();
    assert!(next.team_a.is_none() && next.team_b.is_none());
}

#[test]
fn coerce_score_recovers_malformed_input() {
    assert_eq!(coerce_score(&json!(7)), 7);
    assert_eq!(coerce_score(&json!("12")), 12);
    assert_eq!(coerce_score(&json!(" 3 ")), 3);
    assert_eq!(coerce_score(&json!(-5)), 0);
    assert_eq!(coerce_score(&json!("abc")), 0);
    assert_eq!(coerce_score(&json!(2.5)), 0);
    assert_eq!(coerce_score(&json!(null)), 0);
}
