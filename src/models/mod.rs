//! Data structures for the interclass tournament: teams, matches, tournament state.

mod bracket;
mod team;
mod tournament;

pub use bracket::{BracketMatch, MatchId, MatchResult};
pub use team::{Team, TeamId, MAX_PARTICIPANTS};
pub use tournament::{Tournament, TournamentError};
