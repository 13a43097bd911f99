//! Leaderboard Store
//!
//! Create, replace and the period read over any `LeaderboardBackend`.

use std::collections::HashMap;

use crate::domain::{
    Clock, CreatorEntry, EventEntry, LeaderboardError, LeaderboardPeriod, LeaderboardRecord,
    PeriodLookup, RecordId,
};

use super::pipeline;
use super::{LeaderboardBackend, LeaderboardDocument, StoredCreator, StoredEvent};

/// Store for leaderboard records
#[derive(Debug, Clone)]
pub struct LeaderboardStore<B, C> {
    backend: B,
    clock: C,
}

impl<B, C> LeaderboardStore<B, C>
where
    B: LeaderboardBackend,
    C: Clock,
{
    pub fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Persist a record, assigning an id if it has none.
    ///
    /// Another leaderboard for the same period is not rejected.
    pub async fn create(&self, record: &LeaderboardRecord) -> Result<RecordId, LeaderboardError> {
        let mut document = LeaderboardDocument::from_record(record);
        if document.id.is_nil() {
            document.id = RecordId::generate(self.clock.now());
        }

        self.backend.insert_one(&document).await?;

        tracing::debug!(
            "Leaderboard {} created for {:04}-{:02}",
            document.id,
            document.year,
            document.month
        );

        Ok(document.id)
    }

    /// Replace both entry lists of an existing leaderboard.
    ///
    /// Existence is taken from the update's match count, not from a prior read.
    pub async fn replace_entries(
        &self,
        id: RecordId,
        top_creators: &[CreatorEntry],
        top_events: &[EventEntry],
    ) -> Result<(), LeaderboardError> {
        if id.is_nil() {
            return Err(LeaderboardError::invalid_argument("missing leaderboard id"));
        }

        let creators: Vec<StoredCreator> = top_creators.iter().map(StoredCreator::from).collect();
        let events: Vec<StoredEvent> = top_events.iter().map(StoredEvent::from).collect();

        let matched = self.backend.update_entries(id, &creators, &events).await?;
        if matched == 0 {
            return Err(LeaderboardError::not_found(format!("leaderboard {}", id)));
        }

        tracing::debug!(
            "Leaderboard {} entries replaced ({} creators, {} events)",
            id,
            creators.len(),
            events.len()
        );

        Ok(())
    }

    /// Materialize the leaderboard for a period.
    ///
    /// Returns `PeriodLookup::Missing` with an empty record when nothing is
    /// stored. If several documents share the period, the earliest created wins.
    pub async fn find_by_period(
        &self,
        period: LeaderboardPeriod,
    ) -> Result<PeriodLookup, LeaderboardError> {
        let mut documents = self.backend.find_by_period(period).await?;

        if documents.is_empty() {
            return Ok(PeriodLookup::Missing(LeaderboardRecord::empty(period)));
        }

        if documents.len() > 1 {
            tracing::warn!(
                "{} leaderboards stored for {}, using the earliest",
                documents.len(),
                period
            );
            documents.truncate(1);
        }

        let rows = pipeline::flatten(documents);

        let wager_ids = pipeline::wager_ids(&rows);
        let wagers = if wager_ids.is_empty() {
            HashMap::new()
        } else {
            self.backend.find_wagers(&wager_ids).await?
        };

        let user_ids = pipeline::user_ids(&rows, &wagers);
        let users = if user_ids.is_empty() {
            HashMap::new()
        } else {
            self.backend.find_users(&user_ids).await?
        };

        let record = pipeline::group(pipeline::enrich(rows, &wagers, &users))
            .into_iter()
            .next();

        Ok(match record {
            Some(record) => PeriodLookup::Found(record),
            None => PeriodLookup::Missing(LeaderboardRecord::empty(period)),
        })
    }
}
