// src/models/calendar_sync.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'calendar_sync_state' table: one timestamp row per workspace.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarSyncState {
    pub last_synced_at: chrono::DateTime<chrono::Utc>,
}

/// Outcome of asking the cooldown gate for a sync slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncDecision {
    Allowed {
        synced_at: chrono::DateTime<chrono::Utc>,
    },
    CoolingDown {
        retry_after_secs: i64,
    },
}
