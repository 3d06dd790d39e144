// src/models/mod.rs

pub mod calendar_sync;
pub mod ids;
pub mod leaderboard;
pub mod problem;
pub mod submission;
pub mod team;
pub mod user;
