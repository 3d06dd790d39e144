// src/services/mod.rs

pub mod board_views;
pub mod leaderboard;
pub mod sync_gate;
