//! Tournament business logic: bracket generation, result recording, ranking.

mod bracket;
mod ranking;
mod results;

pub use bracket::{generate_bracket, reset_bracket};
pub use ranking::{compute_ranking, RankedTeam};
pub use results::{advance_winner, coerce_score, record_result};
