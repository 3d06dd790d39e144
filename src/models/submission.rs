// src/models/submission.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ids::{ProblemId, UserId};

/// A scored attempt by a user at a problem.
/// Both ids are nullable in the `submissions` table; rows missing either are ignored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub user_id: Option<UserId>,
    pub problem_id: Option<ProblemId>,
    pub session_id: Option<String>,
    pub total_score: f64,
}

impl Submission {
    pub fn new(user_id: &str, problem_id: &str, total_score: f64) -> Self {
        Self {
            user_id: Some(UserId::from(user_id)),
            problem_id: Some(ProblemId::from(problem_id)),
            session_id: None,
            total_score,
        }
    }
}
