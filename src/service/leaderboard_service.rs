//! Leaderboard Service
//!
//! Create, replace and read leaderboards. Reads come back with display names
//! resolved.

use crate::domain::{
    Clock, CreatorEntry, EventEntry, LeaderboardError, LeaderboardPeriod, LeaderboardRecord,
    PeriodLookup, RecordId,
};
use crate::presenter;
use crate::store::{LeaderboardBackend, LeaderboardStore};

/// Leaderboard operations over a backend and a clock
#[derive(Debug, Clone)]
pub struct LeaderboardService<B, C> {
    store: LeaderboardStore<B, C>,
}

impl<B, C> LeaderboardService<B, C>
where
    B: LeaderboardBackend,
    C: Clock,
{
    pub fn new(backend: B, clock: C) -> Self {
        Self {
            store: LeaderboardStore::new(backend, clock),
        }
    }

    /// Period containing the clock's current time
    pub fn current_period(&self) -> LeaderboardPeriod {
        LeaderboardPeriod::containing(self.store.clock().now())
    }

    /// Persist a new leaderboard and return it with its assigned id
    pub async fn create_one(
        &self,
        mut record: LeaderboardRecord,
    ) -> Result<LeaderboardRecord, LeaderboardError> {
        record.id = self.store.create(&record).await?;
        Ok(record)
    }

    /// Replace both entry lists of leaderboard `id`
    pub async fn update_entries(
        &self,
        id: RecordId,
        top_creators: Vec<CreatorEntry>,
        top_events: Vec<EventEntry>,
    ) -> Result<(), LeaderboardError> {
        self.store
            .replace_entries(id, &top_creators, &top_events)
            .await
    }

    /// Leaderboard for `period` with display names resolved.
    ///
    /// A period with nothing stored yields `PeriodLookup::Missing` holding an
    /// empty record. Store failures are returned untouched.
    pub async fn get_by_period(
        &self,
        period: LeaderboardPeriod,
    ) -> Result<PeriodLookup, LeaderboardError> {
        let mut lookup = self.store.find_by_period(period).await?;
        presenter::present(lookup.record_mut());
        Ok(lookup)
    }
}
