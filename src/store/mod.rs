//! Leaderboard Store module
//!
//! Persistence and the read-time join that materializes leaderboard records
//! from the leaderboard, wager and user collections.

mod backend;
mod documents;
mod memory;
pub mod pipeline;
mod postgres;
mod repository;

pub use backend::{LeaderboardBackend, LeaderboardCollection, UserLookup, WagerLookup};
pub use documents::{LeaderboardDocument, StoredCreator, StoredEvent, UserRef, WagerRef};
pub use memory::MemoryBackend;
pub use postgres::PgLeaderboardBackend;
pub use repository::LeaderboardStore;
