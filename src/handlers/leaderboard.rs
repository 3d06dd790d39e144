// src/handlers/leaderboard.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    db::fetch_leaderboard_rows,
    error::AppError,
    models::{
        ids::{TeamId, UserId},
        leaderboard::{LeaderboardParams, SummaryParams},
    },
    services::{
        board_views::{rank_by_challenge, search, selected_challenge, summarize, team_profile},
        leaderboard::{Ranked, aggregate, paginate},
    },
};

/// Applies the challenge filter and name search shared by both boards.
fn narrow<T: Ranked>(mut board: Vec<T>, params: &LeaderboardParams) -> Vec<T> {
    if let Some(challenge_id) = selected_challenge(params.challenge.as_ref()) {
        board = rank_by_challenge(board, challenge_id);
    }
    if let Some(q) = &params.q {
        board = search(board, q);
    }
    board
}

/// Returns one page of the team leaderboard.
///
/// * `page`: 1-indexed, 50 teams per page.
/// * `challenge`: rank by that challenge's score, dropping teams that scored 0 on it.
///   `all` or an empty value keeps the overall ranking.
/// * `q`: case-insensitive team name filter; ranks are kept.
///
/// A failed row fetch yields an empty board rather than an error.
pub async fn get_team_leaderboard(
    State(pool): State<PgPool>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let rows = fetch_leaderboard_rows(&pool).await;
    let standings = narrow(aggregate(&rows).standings, &params);
    let page = paginate(standings, params.page.unwrap_or(1), &rows, chrono::Utc::now());

    Ok(Json(page))
}

/// Returns one page of the individual leaderboard.
///
/// Users are ranked by the sum of their best score per problem, with the same
/// `page`, `challenge` and `q` parameters as the team board.
pub async fn get_user_leaderboard(
    State(pool): State<PgPool>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let rows = fetch_leaderboard_rows(&pool).await;
    let users = narrow(aggregate(&rows).users, &params);
    let page = paginate(users, params.page.unwrap_or(1), &rows, chrono::Utc::now());

    Ok(Json(page))
}

/// Overall standing of a single user.
pub async fn get_user_standing(
    State(pool): State<PgPool>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let rows = fetch_leaderboard_rows(&pool).await;

    let standing = aggregate(&rows)
        .users
        .into_iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_id)))?;

    Ok(Json(standing))
}

/// Headline numbers and the top three teams.
pub async fn get_leaderboard_summary(
    State(pool): State<PgPool>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = fetch_leaderboard_rows(&pool).await;
    let mut standings = aggregate(&rows).standings;

    if let Some(challenge_id) = selected_challenge(params.challenge.as_ref()) {
        standings = rank_by_challenge(standings, challenge_id);
    }

    Ok(Json(summarize(&standings, params.team_id.as_ref())))
}

/// Profile of a single team: rank, per-challenge scores and member contributions.
pub async fn get_team_profile(
    State(pool): State<PgPool>,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, AppError> {
    let rows = fetch_leaderboard_rows(&pool).await;
    let aggregation = aggregate(&rows);

    let profile = team_profile(&aggregation, &rows.challenges, &team_id)
        .ok_or_else(|| AppError::NotFound(format!("Team '{}' not found", team_id)))?;

    Ok(Json(profile))
}
