// src/services/board_views.rs

use crate::{
    models::{
        ids::{ChallengeId, TeamId},
        leaderboard::LeaderboardSummary,
        problem::Challenge,
        team::{ChallengeDetail, MemberContribution, TeamProfile, TeamStanding, TeamStats},
    },
    services::leaderboard::{Aggregation, Ranked, rank_by_score},
};

/// `?challenge=` value that selects the overall board.
const ALL_CHALLENGES: &str = "all";

/// The challenge a request narrows the board to, if any.
pub fn selected_challenge(challenge: Option<&ChallengeId>) -> Option<&ChallengeId> {
    challenge.filter(|id| {
        let id = id.as_str().trim();
        !id.is_empty() && id != ALL_CHALLENGES
    })
}

/// Re-ranks a board by a single challenge.
///
/// Rows without a positive score on that challenge are dropped;
/// the rest are ranked 1..M by their challenge score.
pub fn rank_by_challenge<T: Ranked>(rows: Vec<T>, challenge_id: &ChallengeId) -> Vec<T> {
    let mut filtered: Vec<T> = rows
        .into_iter()
        .filter_map(|mut row| {
            let score = row.challenge_scores().get(challenge_id).copied().unwrap_or(0.0);
            row.set_score(score);
            (score > 0.0).then_some(row)
        })
        .collect();

    rank_by_score(&mut filtered);
    filtered
}

/// Keeps rows whose name contains `query`, ignoring case. Ranks are left untouched.
///
/// A blank query keeps everything. Otherwise the query is matched as given,
/// surrounding whitespace included.
pub fn search<T: Ranked>(rows: Vec<T>, query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return rows;
    }

    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|row| row.name().to_lowercase().contains(&needle))
        .collect()
}

pub fn summarize(standings: &[TeamStanding], team_id: Option<&TeamId>) -> LeaderboardSummary {
    let current_rank = team_id
        .and_then(|id| standings.iter().find(|s| &s.id == id))
        .map(|s| s.rank)
        .unwrap_or(0);

    let top = standings.first();

    LeaderboardSummary {
        current_rank,
        top_score: top.map(|s| s.score).unwrap_or(0.0),
        top_team_name: top.map(|s| s.name.clone()).unwrap_or_default(),
        total_participants: standings.len(),
        top_three: standings.iter().take(3).cloned().collect(),
    }
}

/// Builds the profile of one team from a finished aggregation.
/// Returns `None` when the team is not on the board.
pub fn team_profile(
    aggregation: &Aggregation,
    challenges: &[Challenge],
    team_id: &TeamId,
) -> Option<TeamProfile> {
    let standing = aggregation.standings.iter().find(|s| &s.id == team_id)?;

    let individual: Vec<f64> = standing
        .members
        .iter()
        .map(|m| aggregation.individual_scores.get(&m.user_id).copied().unwrap_or(0.0))
        .collect();
    let members_total: f64 = individual.iter().sum();

    let members = standing
        .members
        .iter()
        .zip(&individual)
        .map(|(member, score)| MemberContribution {
            user_id: member.user_id.clone(),
            display_name: member.display_name.clone(),
            avatar_url: member.avatar_url.clone(),
            individual_score: *score,
            contribution_percentage: if members_total > 0.0 {
                score * 100.0 / members_total
            } else {
                0.0
            },
        })
        .collect();

    let challenge_details = standing
        .challenge_scores
        .iter()
        .map(|(id, score)| ChallengeDetail {
            id: id.clone(),
            title: challenges
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| id.to_string()),
            score: *score,
        })
        .collect();

    let total_members = standing.members.len();
    let average_member_score = if total_members > 0 {
        members_total / total_members as f64
    } else {
        0.0
    };

    Some(TeamProfile {
        id: standing.id.clone(),
        name: standing.name.clone(),
        avatar: standing.avatar.clone(),
        rank: standing.rank,
        total_score: standing.total_score,
        challenge_scores: standing.challenge_scores.clone(),
        challenge_details,
        members,
        stats: TeamStats {
            total_members,
            average_member_score,
        },
    })
}
