//! Tournament state value and error type.

use crate::models::bracket::{BracketMatch, MatchId, MatchResult};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 teams registered; no bracket can be generated.
    NotEnoughTeams,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Team name is empty after trimming.
    EmptyTeamName,
    /// Roster change attempted while a bracket exists (roster is frozen
    /// for the lifetime of one bracket).
    RosterLocked,
    /// Team not found in the roster.
    TeamNotFound(TeamId),
    /// No bracket has been generated yet.
    BracketNotGenerated,
    /// Match id does not reference a match in the current bracket.
    MatchNotFound(MatchId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to generate a bracket"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::EmptyTeamName => write!(f, "Team name must not be empty"),
            TournamentError::RosterLocked => {
                write!(f, "Roster cannot change while a bracket exists; reset the bracket first")
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::BracketNotGenerated => write!(f, "No bracket has been generated"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found in the current bracket"),
        }
    }
}

/// Full tournament state: roster, match tree, and recorded results.
///
/// This value is the single unit of state every core operation works on.
/// The bracket and the result map belong to one generation: regenerating
/// the bracket replaces both together, so no result can reference a stale
/// match id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tournament {
    /// Registered teams, in registration order.
    pub teams: Vec<Team>,
    /// Match tree for the current generation; `None` until generated.
    pub bracket: Option<Vec<BracketMatch>>,
    /// Results keyed by match id, at most one per match.
    pub results: HashMap<MatchId, MatchResult>,
}

impl Tournament {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team. Names are trimmed and must be unique
    /// (case-insensitive). Fails while a bracket exists.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        coach: impl Into<String>,
        participants: Vec<String>,
    ) -> Result<(), TournamentError> {
        if self.bracket.is_some() {
            return Err(TournamentError::RosterLocked);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let coach = coach.into();
        self.teams.push(Team::new(name_trimmed, coach.trim(), participants));
        Ok(())
    }

    /// Remove a team by id. Fails while a bracket exists.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.bracket.is_some() {
            return Err(TournamentError::RosterLocked);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Look up a team by id.
    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Look up a match in the current bracket.
    pub fn get_match(&self, id: MatchId) -> Option<&BracketMatch> {
        self.bracket.as_ref()?.iter().find(|m| m.id == id)
    }

    /// The final match of the current bracket, if one exists.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.bracket.as_ref()?.iter().find(|m| m.is_final())
    }
}
