// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    ids::{ChallengeId, TeamId},
    problem::{Challenge, Problem},
    submission::Submission,
    team::{TeamMember, TeamStanding},
    user::UserProfile,
};

/// The raw row sets the aggregator works on.
/// Produced by `db::fetch_leaderboard_rows`; any set may be empty when its query failed.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardRows {
    pub members: Vec<TeamMember>,
    pub users: Vec<UserProfile>,
    pub submissions: Vec<Submission>,
    pub problems: Vec<Problem>,
    pub challenges: Vec<Challenge>,
}

/// Query parameters for `GET /api/leaderboard/teams` and `GET /api/leaderboard/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardParams {
    /// 1-indexed page number (default: 1).
    #[validate(range(min = 1, max = 10000, message = "Page must be between 1 and 10000"))]
    pub page: Option<usize>,

    /// Rank by a single challenge's score instead of the total.
    /// `all` or an empty value means no filter.
    pub challenge: Option<ChallengeId>,

    /// Case-insensitive name filter.
    #[validate(length(max = 100, message = "Search query must be at most 100 chars"))]
    pub q: Option<String>,
}

/// Query parameters for `GET /api/leaderboard/teams/summary`.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub challenge: Option<ChallengeId>,
    /// Team whose rank is reported as `current_rank`.
    pub team_id: Option<TeamId>,
}

/// One page of a leaderboard, either teams or individual users.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardPage<T> {
    pub data: Vec<T>,
    pub challenges: Vec<Challenge>,
    pub problems: Vec<Problem>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub page: usize,
    pub total_entries: usize,
    pub calculated_at: chrono::DateTime<chrono::Utc>,
}

/// Headline numbers shown above the leaderboard table.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardSummary {
    /// Rank of the requested team, 0 when absent or unranked.
    pub current_rank: usize,
    pub top_score: f64,
    pub top_team_name: String,
    pub total_participants: usize,
    pub top_three: Vec<TeamStanding>,
}
