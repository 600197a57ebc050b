//! Team data structure and roster constants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in match slots and lookups).
pub type TeamId = Uuid;

/// A team keeps at most this many listed participants.
pub const MAX_PARTICIPANTS: usize = 20;

/// A registered team.
///
/// `wins`, `losses` and `points` are derived fields: the ranking pass
/// recomputes them from the recorded results and overwrites whatever is
/// stored here. Nothing else may mutate them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name, unique case-insensitively across the roster.
    pub name: String,
    pub coach: String,
    /// Participant names, capped at [`MAX_PARTICIPANTS`].
    pub participants: Vec<String>,
    pub wins: u32,
    pub losses: u32,
    /// Cumulative raw score across all played matches.
    pub points: u32,
    pub created: DateTime<Utc>,
}

impl Team {
    /// Create a new team. Participant entries are trimmed, blanks dropped,
    /// and the list truncated to [`MAX_PARTICIPANTS`].
    pub fn new(name: impl Into<String>, coach: impl Into<String>, participants: Vec<String>) -> Self {
        let mut participants: Vec<String> = participants
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        participants.truncate(MAX_PARTICIPANTS);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coach: coach.into(),
            participants,
            wins: 0,
            losses: 0,
            points: 0,
            created: Utc::now(),
        }
    }

    /// Zero the derived stats before a ranking recomputation.
    pub fn reset_stats(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.points = 0;
    }
}
