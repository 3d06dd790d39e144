// src/handlers/mod.rs

pub mod calendar_sync;
pub mod leaderboard;
