//! Leaderboard Error Types
//!
//! Errors surfaced by the store and service layers.

use thiserror::Error;

/// Errors for leaderboard operations
///
/// `NotFound` and `InvalidArgument` are caller-facing outcomes. Everything else
/// is an infrastructural store failure and is passed through unmodified.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// No leaderboard for the period, or the replace target does not exist
    #[error("Leaderboard not found: {0}")]
    NotFound(String),

    /// Missing identifier or malformed period
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend failure outside of SQL (in-memory backend, injected faults)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl LeaderboardError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from the underlying store
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Unavailable(_))
    }
}
