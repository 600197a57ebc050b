//! Match tree nodes and recorded results for the elimination bracket.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One node of the elimination tree.
///
/// Round 1 matches are seeded directly from the roster and have no
/// previous-match links. Matches in later rounds start with empty team
/// slots; the advancement pass fills them as winners come in. The final is
/// the single match with `next_match_id == None`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    /// 1-based round number; round 1 are the leaf matches.
    pub round: u32,
    /// `None` in round 1 means a bye slot; in later rounds, a slot not yet
    /// filled by a winner.
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    /// The child match whose winner fills `team_a`.
    pub prev_match_a: Option<MatchId>,
    /// The child match whose winner fills `team_b` (absent when an odd
    /// match count carried this node up with a single child).
    pub prev_match_b: Option<MatchId>,
    pub next_match_id: Option<MatchId>,
}

impl BracketMatch {
    /// A round-1 match seeded with team slots (the second may be a bye).
    pub fn leaf(round: u32, team_a: Option<TeamId>, team_b: Option<TeamId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_a,
            team_b,
            prev_match_a: None,
            prev_match_b: None,
            next_match_id: None,
        }
    }

    /// A later-round match fed by one or two child matches. Team slots
    /// start empty and are filled by advancement.
    pub fn parent(round: u32, prev_match_a: MatchId, prev_match_b: Option<MatchId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_a: None,
            team_b: None,
            prev_match_a: Some(prev_match_a),
            prev_match_b,
            next_match_id: None,
        }
    }

    /// True for the single root of the tree.
    pub fn is_final(&self) -> bool {
        self.next_match_id.is_none()
    }
}

/// Recorded outcome of one match, stored separately from the tree so a
/// match can exist without a result.
///
/// `winner_team_id` is `None` for a tie (no advancement possible) and for
/// scores involving an empty slot that came out ahead.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: u32,
    pub score_b: u32,
    pub winner_team_id: Option<TeamId>,
}
