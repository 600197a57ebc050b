//! Ranking: full recomputation of team stats from recorded results.

use crate::models::{Team, TeamId, Tournament};
use serde::Serialize;

/// One row of the computed ranking.
#[derive(Clone, Debug, Serialize)]
pub struct RankedTeam {
    /// 1-based position after sorting.
    pub rank: u32,
    pub team: Team,
}

/// Recompute every team's wins/losses/points from the recorded results
/// and return the full ranking.
///
/// Stats are rebuilt from scratch on every call — roster, bracket, and
/// results are the only inputs — so the stored numbers cannot drift from
/// the result log. Points are cumulative raw scores across all played
/// matches, win or lose; the winner gains a win and the loser a loss,
/// with neither changing on a tie. Sort order: wins descending, points
/// descending, name ascending (case-sensitive) — a total order while
/// names are unique. The recomputed stats are written back onto the
/// roster as a derived cache.
pub fn compute_ranking(tournament: &mut Tournament) -> Vec<RankedTeam> {
    for team in &mut tournament.teams {
        team.reset_stats();
    }

    if let Some(bracket) = &tournament.bracket {
        for m in bracket {
            let res = match tournament.results.get(&m.id) {
                Some(r) => r,
                None => continue,
            };
            if let Some(id) = m.team_a {
                if let Some(t) = team_mut(&mut tournament.teams, id) {
                    t.points += res.score_a;
                }
            }
            if let Some(id) = m.team_b {
                if let Some(t) = team_mut(&mut tournament.teams, id) {
                    t.points += res.score_b;
                }
            }
            if let Some(winner) = res.winner_team_id {
                let loser = if Some(winner) == m.team_a {
                    m.team_b
                } else {
                    m.team_a
                };
                if let Some(t) = team_mut(&mut tournament.teams, winner) {
                    t.wins += 1;
                }
                if let Some(id) = loser {
                    if let Some(t) = team_mut(&mut tournament.teams, id) {
                        t.losses += 1;
                    }
                }
            }
        }
    }

    let mut sorted = tournament.teams.clone();
    sorted.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points.cmp(&a.points))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, team)| RankedTeam {
            rank: i as u32 + 1,
            team,
        })
        .collect()
}

fn team_mut(teams: &mut [Team], id: TeamId) -> Option<&mut Team> {
    teams.iter_mut().find(|t| t.id == id)
}
