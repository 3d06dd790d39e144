// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Number of teams per leaderboard page.
pub const LEADERBOARD_PAGE_SIZE: usize = 50;

/// Minimum seconds between two calendar syncs of one workspace.
pub const DEFAULT_SYNC_COOLDOWN_SECS: i64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub sync_cooldown_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let sync_cooldown_secs = env::var("CALENDAR_SYNC_COOLDOWN_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SYNC_COOLDOWN_SECS);

        Self {
            database_url,
            jwt_secret,
            rust_log,
            bind_addr,
            sync_cooldown_secs,
        }
    }

    pub fn sync_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.sync_cooldown_secs)
    }
}
