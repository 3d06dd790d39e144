// src/services/sync_gate.rs

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        calendar_sync::{CalendarSyncState, SyncDecision},
        ids::WorkspaceId,
    },
};

/// Decides whether a sync may run at `now` given the previous one.
pub fn evaluate(
    last_synced_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> SyncDecision {
    match last_synced_at {
        Some(last) if now - last < cooldown => {
            let remaining = cooldown - (now - last);
            // Round partial seconds up so clients never retry too early.
            let secs = (remaining.num_milliseconds() + 999) / 1000;
            SyncDecision::CoolingDown {
                retry_after_secs: secs.max(1),
            }
        }
        _ => SyncDecision::Allowed { synced_at: now },
    }
}

/// Claims a sync slot for the workspace.
///
/// Reads the last sync timestamp, and if the cooldown has elapsed records `now`.
/// There is no row lock: two racing requests can both be allowed.
pub async fn try_acquire(
    pool: &PgPool,
    ws_id: &WorkspaceId,
    cooldown: Duration,
) -> Result<SyncDecision, AppError> {
    let state = sqlx::query_as::<_, CalendarSyncState>(
        "SELECT last_synced_at FROM calendar_sync_state WHERE ws_id = $1",
    )
    .bind(ws_id)
    .fetch_optional(pool)
    .await?;

    let decision = evaluate(state.map(|s| s.last_synced_at), Utc::now(), cooldown);

    if let SyncDecision::Allowed { synced_at } = &decision {
        sqlx::query(
            r#"
            INSERT INTO calendar_sync_state (ws_id, last_synced_at)
            VALUES ($1, $2)
            ON CONFLICT (ws_id) DO UPDATE SET last_synced_at = EXCLUDED.last_synced_at
            "#,
        )
        .bind(ws_id)
        .bind(synced_at)
        .execute(pool)
        .await?;

        tracing::info!("Calendar sync slot granted for workspace {}", ws_id);
    } else {
        tracing::debug!("Calendar sync for workspace {} is cooling down", ws_id);
    }

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn first_sync_is_allowed() {
        let decision = evaluate(None, at(0), Duration::seconds(30));
        assert_eq!(decision, SyncDecision::Allowed { synced_at: at(0) });
    }

    #[test]
    fn sync_within_cooldown_is_refused() {
        let decision = evaluate(Some(at(0)), at(10), Duration::seconds(30));
        assert_eq!(decision, SyncDecision::CoolingDown { retry_after_secs: 20 });
    }

    #[test]
    fn sync_after_cooldown_is_allowed() {
        let cooldown = Duration::seconds(30);
        assert_eq!(
            evaluate(Some(at(0)), at(30), cooldown),
            SyncDecision::Allowed { synced_at: at(30) }
        );
        assert_eq!(
            evaluate(Some(at(0)), at(95), cooldown),
            SyncDecision::Allowed { synced_at: at(95) }
        );
    }

    #[test]
    fn partial_seconds_round_up() {
        let last = at(0);
        let now = last + Duration::milliseconds(29_500);
        let decision = evaluate(Some(last), now, Duration::seconds(30));
        assert_eq!(decision, SyncDecision::CoolingDown { retry_after_secs: 1 });
    }

    #[test]
    fn decision_serializes_with_status_tag() {
        let json = serde_json::to_value(SyncDecision::CoolingDown { retry_after_secs: 5 }).unwrap();
        assert_eq!(json["status"], "cooling_down");
        assert_eq!(json["retry_after_secs"], 5);
    }
}
