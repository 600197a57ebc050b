//! Result recording and winner advancement.

use crate::models::{MatchId, MatchResult, Tournament, TournamentError};
use serde_json::Value;

/// Coerce raw score input to a non-negative integer.
///
/// Accepts a JSON number or a numeric string; anything malformed or
/// negative becomes 0 so bad input never blocks result entry.
pub fn coerce_score(raw: &Value) -> u32 {
    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| *v >= 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Record the outcome of one match, then advance the winner.
///
/// The winner is the `team_a` slot on a higher `score_a`, the `team_b`
/// slot on a higher `score_b`, and nobody on a tie. A tie is a valid
/// terminal state: the format has no tiebreak rule, so the operator
/// re-enters scores when a decision is needed. Recording overwrites any
/// previous result for the match.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    let bracket = tournament
        .bracket
        .as_ref()
        .ok_or(TournamentError::BracketNotGenerated)?;
    let m = bracket
        .iter()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    // An empty slot can never be the winner, so a bye match resolves only
    // when the present team's score is strictly higher.
    let winner_team_id = if score_a > score_b {
        m.team_a
    } else if score_b > score_a {
        m.team_b
    } else {
        None
    };

    tournament.results.insert(
        match_id,
        MatchResult {
            score_a,
            score_b,
            winner_team_id,
        },
    );
    advance_winner(tournament, match_id);
    Ok(())
}

/// Propagate a recorded winner into the next round's team slot.
///
/// No-op when the match has no recorded winner (tie or no result yet) or
/// no next match (it is the final). Otherwise the winner lands in the
/// slot matching the back-reference: `team_a` when this match is the next
/// match's `prev_match_a`, `team_b` when it is `prev_match_b`. Re-running
/// with the same result leaves the slot unchanged; a changed winner
/// overwrites it.
pub fn advance_winner(tournament: &mut Tournament, match_id: MatchId) {
    let winner = match tournament
        .results
        .get(&match_id)
        .and_then(|r| r.winner_team_id)
    {
        Some(w) => w,
        None => return,
    };
    let bracket = match tournament.bracket.as_mut() {
        Some(b) => b,
        None => return,
    };
    let next_id = match bracket
        .iter()
        .find(|m| m.id == match_id)
        .and_then(|m| m.next_match_id)
    {
        Some(id) => id,
        None => return,
    };
    if let Some(next) = bracket.iter_mut().find(|m| m.id == next_id) {
        if next.prev_match_a == Some(match_id) {
            next.team_a = Some(winner);
        } else if next.prev_match_b == Some(match_id) {
            next.team_b = Some(winner);
        }
    }
}
