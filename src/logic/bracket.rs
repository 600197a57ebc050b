//! Bracket generation: shuffle the roster and build the elimination tree.

use crate::models::{BracketMatch, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the elimination bracket for the current roster.
///
/// 1. Shuffle the roster through `rng` (injected so tests can seed it).
/// 2. Pair consecutive teams into round-1 matches; an odd roster leaves
///    the last match with an empty `team_b` (a bye slot).
/// 3. Pair each round's matches two-by-two, in order, into parent matches
///    until a single final remains. An odd match count carries the last
///    match up with only `prev_match_a` set.
///
/// The previous bracket and all recorded results are replaced together, so
/// no result can outlive the match ids it refers to. Byes are not
/// auto-resolved: the empty slot stays pending until the operator records
/// a result for that match.
pub fn generate_bracket<R: Rng>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut seeds: Vec<_> = tournament.teams.iter().map(|t| t.id).collect();
    seeds.shuffle(rng);

    let mut all_matches: Vec<BracketMatch> = Vec::new();
    let mut current: Vec<BracketMatch> = seeds
        .chunks(2)
        .map(|pair| BracketMatch::leaf(1, Some(pair[0]), pair.get(1).copied()))
        .collect();

    let mut round = 2;
    while current.len() > 1 {
        let mut next: Vec<BracketMatch> = Vec::new();
        for pair in current.chunks_mut(2) {
            let parent = BracketMatch::parent(round, pair[0].id, pair.get(1).map(|m| m.id));
            for child in pair.iter_mut() {
                child.next_match_id = Some(parent.id);
            }
            next.push(parent);
        }
        all_matches.append(&mut current);
        current = next;
        round += 1;
    }
    // The single remaining match is the final; its next_match_id stays None.
    all_matches.append(&mut current);

    tournament.bracket = Some(all_matches);
    tournament.results.clear();
    Ok(())
}

/// Clear the bracket and all results, returning to a roster-only state.
pub fn reset_bracket(tournament: &mut Tournament) {
    tournament.bracket = None;
    tournament.results.clear();
}
