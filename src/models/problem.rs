// src/models/problem.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ids::{ChallengeId, ProblemId};

/// Represents the 'problems' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    /// Problems without a parent challenge are left out of every team total.
    pub challenge_id: Option<ChallengeId>,
    pub title: String,
}

/// Represents the 'challenges' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
}
