// src/models/team.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ids::{ChallengeId, ProblemId, TeamId, UserId};

/// One row of `team_members` joined with `teams` and `users`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: TeamId,
    pub team_name: String,
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Public member info embedded in a leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Best consolidated score of a team on one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemScore {
    pub problem_id: ProblemId,
    pub title: String,
    pub score: f64,
}

/// A team's row on the leaderboard, derived from scratch on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub id: TeamId,
    pub name: String,
    /// First member's avatar, or an empty string.
    pub avatar: String,
    pub members: Vec<MemberSummary>,
    pub challenge_scores: BTreeMap<ChallengeId, f64>,
    pub problem_scores: BTreeMap<ChallengeId, Vec<ProblemScore>>,
    pub total_score: f64,
    /// The value this row is ranked by: `total_score` on the overall board,
    /// the challenge score on a challenge-filtered board.
    pub score: f64,
    pub rank: usize,
}

/// Member entry of a team profile.
#[derive(Debug, Clone, Serialize)]
pub struct MemberContribution {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub individual_score: f64,
    pub contribution_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChallengeDetail {
    pub id: ChallengeId,
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamStats {
    pub total_members: usize,
    pub average_member_score: f64,
}

/// Response body of `GET /api/leaderboard/teams/{team_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct TeamProfile {
    pub id: TeamId,
    pub name: String,
    pub avatar: String,
    pub rank: usize,
    pub total_score: f64,
    pub challenge_scores: BTreeMap<ChallengeId, f64>,
    pub challenge_details: Vec<ChallengeDetail>,
    pub members: Vec<MemberContribution>,
    pub stats: TeamStats,
}
