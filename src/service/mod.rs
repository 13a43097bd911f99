//! Service module
//!
//! Orchestrates the store and the presenter for callers.

mod leaderboard_service;

pub use leaderboard_service::LeaderboardService;
