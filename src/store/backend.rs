//! Backend Capabilities
//!
//! The three collections the leaderboard read joins over. Each backend
//! (Postgres, in-memory) implements all of them.

use std::collections::HashMap;
use std::future::Future;

use crate::domain::{LeaderboardError, LeaderboardPeriod, RecordId};

use super::{LeaderboardDocument, StoredCreator, StoredEvent, UserRef, WagerRef};

/// Leaderboard document collection
pub trait LeaderboardCollection: Send + Sync {
    fn insert_one(
        &self,
        document: &LeaderboardDocument,
    ) -> impl Future<Output = Result<(), LeaderboardError>> + Send;

    /// Every document stored for the period, oldest first
    fn find_by_period(
        &self,
        period: LeaderboardPeriod,
    ) -> impl Future<Output = Result<Vec<LeaderboardDocument>, LeaderboardError>> + Send;

    /// Overwrite both entry lists of `id`, returning how many documents matched
    fn update_entries(
        &self,
        id: RecordId,
        top_creators: &[StoredCreator],
        top_events: &[StoredEvent],
    ) -> impl Future<Output = Result<u64, LeaderboardError>> + Send;
}

pub trait WagerLookup: Send + Sync {
    /// Wagers by id; unknown ids are left out of the map
    fn find_wagers(
        &self,
        ids: &[RecordId],
    ) -> impl Future<Output = Result<HashMap<RecordId, WagerRef>, LeaderboardError>> + Send;
}

pub trait UserLookup: Send + Sync {
    /// Users by id; unknown ids are left out of the map
    fn find_users(
        &self,
        ids: &[RecordId],
    ) -> impl Future<Output = Result<HashMap<RecordId, UserRef>, LeaderboardError>> + Send;
}

/// Everything `LeaderboardStore` needs from a backend
pub trait LeaderboardBackend: LeaderboardCollection + WagerLookup + UserLookup {}

impl<T> LeaderboardBackend for T where T: LeaderboardCollection + WagerLookup + UserLookup {}
