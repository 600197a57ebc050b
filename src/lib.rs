//! Interclass tournament web app: library with models and bracket logic.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    advance_winner, coerce_score, compute_ranking, generate_bracket, record_result, reset_bracket,
    RankedTeam,
};
pub use models::{
    BracketMatch, MatchId, MatchResult, Team, TeamId, Tournament, TournamentError,
    MAX_PARTICIPANTS,
};
pub use storage::SnapshotStore;
