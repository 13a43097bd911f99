//! Domain module
//!
//! Leaderboard types, identifiers and errors.

pub mod clock;
pub mod error;
pub mod leaderboard;
pub mod record_id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LeaderboardError;
pub use leaderboard::{
    CreatorEntry, DisplayIdentity, EventEntry, LeaderboardPeriod, LeaderboardRecord,
    PeriodLookup,
};
pub use record_id::RecordId;
