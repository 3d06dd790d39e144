// src/db.rs

use sqlx::{PgPool, Postgres, postgres::PgRow};

use crate::models::{
    leaderboard::LeaderboardRows,
    problem::{Challenge, Problem},
    submission::Submission,
    team::TeamMember,
    user::UserProfile,
};

const MEMBERS_SQL: &str = r#"
    SELECT
        tm.team_id,
        t.name AS team_name,
        tm.user_id,
        COALESCE(u.display_name, '') AS display_name,
        u.avatar_url
    FROM team_members tm
    JOIN teams t ON t.id = tm.team_id
    JOIN users u ON u.id = tm.user_id
    ORDER BY t.created_at, tm.created_at
"#;

const USERS_SQL: &str = r#"
    SELECT id, COALESCE(display_name, '') AS display_name, avatar_url
    FROM users
    ORDER BY created_at
"#;

const SUBMISSIONS_SQL: &str = r#"
    SELECT user_id, problem_id, session_id, total_score
    FROM submissions
"#;

const PROBLEMS_SQL: &str = r#"
    SELECT id, challenge_id, title
    FROM problems
    ORDER BY created_at
"#;

const CHALLENGES_SQL: &str = r#"
    SELECT id, title
    FROM challenges
    ORDER BY created_at
"#;

/// Runs one query and logs instead of failing.
/// A failed query yields an empty row set, so the board degrades to empty.
async fn fetch_or_empty<T>(pool: &PgPool, sql: &'static str, what: &str) -> Vec<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    match sqlx::query_as::<Postgres, T>(sql).fetch_all(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch {}: {:?}", what, e);
            Vec::new()
        }
    }
}

/// Loads every row set the leaderboard needs.
pub async fn fetch_leaderboard_rows(pool: &PgPool) -> LeaderboardRows {
    let (members, users, submissions, problems, challenges) = tokio::join!(
        fetch_or_empty::<TeamMember>(pool, MEMBERS_SQL, "team members"),
        fetch_or_empty::<UserProfile>(pool, USERS_SQL, "users"),
        fetch_or_empty::<Submission>(pool, SUBMISSIONS_SQL, "submissions"),
        fetch_or_empty::<Problem>(pool, PROBLEMS_SQL, "problems"),
        fetch_or_empty::<Challenge>(pool, CHALLENGES_SQL, "challenges"),
    );

    tracing::debug!(
        members = members.len(),
        users = users.len(),
        submissions = submissions.len(),
        problems = problems.len(),
        "Fetched leaderboard rows"
    );

    LeaderboardRows {
        members,
        users,
        submissions,
        problems,
        challenges,
    }
}
