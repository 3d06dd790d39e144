// src/handlers/calendar_sync.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::{calendar_sync::SyncDecision, ids::WorkspaceId},
    services::sync_gate,
    utils::jwt::Claims,
};

/// Asks for a background calendar sync slot for a workspace.
///
/// Responds 200 with `status: allowed` when the caller may write to the
/// external calendar now, or 429 with `status: cooling_down` otherwise.
pub async fn request_sync(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Path(ws_id): Path<WorkspaceId>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("User {} requested calendar sync for {}", claims.sub, ws_id);

    let decision = sync_gate::try_acquire(&pool, &ws_id, config.sync_cooldown()).await?;

    let status = match decision {
        SyncDecision::Allowed { .. } => StatusCode::OK,
        SyncDecision::CoolingDown { .. } => StatusCode::TOO_MANY_REQUESTS,
    };

    Ok((status, Json(decision)))
}
