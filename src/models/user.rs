// src/models/user.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{
    ids::{ChallengeId, TeamId, UserId},
    team::ProblemScore,
};

/// One row of the 'users' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A user's row on the individual leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStanding {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    /// First team the user is a member of, if any.
    pub team_id: Option<TeamId>,
    pub challenge_scores: BTreeMap<ChallengeId, f64>,
    pub problem_scores: BTreeMap<ChallengeId, Vec<ProblemScore>>,
    pub total_score: f64,
    /// Same meaning as `TeamStanding::score`.
    pub score: f64,
    pub rank: usize,
}
