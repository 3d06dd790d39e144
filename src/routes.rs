// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{calendar_sync, leaderboard},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Public leaderboard routes.
/// * Token-protected calendar sync gate.
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let leaderboard_routes = Router::new()
        .route("/teams", get(leaderboard::get_team_leaderboard))
        .route("/teams/summary", get(leaderboard::get_leaderboard_summary))
        .route("/teams/{team_id}", get(leaderboard::get_team_profile))
        .route("/users", get(leaderboard::get_user_leaderboard))
        .route("/users/{user_id}", get(leaderboard::get_user_standing));

    let workspace_routes = Router::new()
        .route("/{ws_id}/calendar/sync", post(calendar_sync::request_sync))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/leaderboard", leaderboard_routes)
        .nest("/api/workspaces", workspace_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
