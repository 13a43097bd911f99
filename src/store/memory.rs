//! In-memory Backend
//!
//! Holds the three collections in process. Used by tests and local runs
//! without a database.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{LeaderboardError, LeaderboardPeriod, RecordId};

use super::{
    LeaderboardCollection, LeaderboardDocument, StoredCreator, StoredEvent, UserLookup, UserRef,
    WagerLookup, WagerRef,
};

#[derive(Debug, Default)]
struct MemoryState {
    // insertion order
    leaderboards: Vec<LeaderboardDocument>,
    wagers: HashMap<RecordId, WagerRef>,
    users: HashMap<RecordId, UserRef>,
    failure: Option<String>,
}

impl MemoryState {
    fn check(&self) -> Result<(), LeaderboardError> {
        match &self.failure {
            Some(reason) => Err(LeaderboardError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Cloneable handle to shared in-memory collections
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_wager(&self, wager: WagerRef) {
        self.state.write().await.wagers.insert(wager.id, wager);
    }

    pub async fn insert_user(&self, user: UserRef) {
        self.state.write().await.users.insert(user.id, user);
    }

    /// Make every following call fail with `reason`
    pub async fn fail_with(&self, reason: impl Into<String>) {
        self.state.write().await.failure = Some(reason.into());
    }

    pub async fn recover(&self) {
        self.state.write().await.failure = None;
    }
}

impl LeaderboardCollection for MemoryBackend {
    async fn insert_one(&self, document: &LeaderboardDocument) -> Result<(), LeaderboardError> {
        let mut state = self.state.write().await;
        state.check()?;
        state.leaderboards.push(document.clone());
        Ok(())
    }

    async fn find_by_period(
        &self,
        period: LeaderboardPeriod,
    ) -> Result<Vec<LeaderboardDocument>, LeaderboardError> {
        let state = self.state.read().await;
        state.check()?;
        Ok(state
            .leaderboards
            .iter()
            .filter(|doc| doc.year == period.year() && doc.month == period.month())
            .cloned()
            .collect())
    }

    async fn update_entries(
        &self,
        id: RecordId,
        top_creators: &[StoredCreator],
        top_events: &[StoredEvent],
    ) -> Result<u64, LeaderboardError> {
        let mut state = self.state.write().await;
        state.check()?;

        let mut matched = 0;
        for doc in state.leaderboards.iter_mut().filter(|doc| doc.id == id) {
            doc.top_creators = top_creators.to_vec();
            doc.top_events = top_events.to_vec();
            matched += 1;
        }
        Ok(matched)
    }
}

impl WagerLookup for MemoryBackend {
    async fn find_wagers(
        &self,
        ids: &[RecordId],
    ) -> Result<HashMap<RecordId, WagerRef>, LeaderboardError> {
        let state = self.state.read().await;
        state.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.wagers.get(id).map(|wager| (*id, wager.clone())))
            .collect())
    }
}

impl UserLookup for MemoryBackend {
    async fn find_users(
        &self,
        ids: &[RecordId],
    ) -> Result<HashMap<RecordId, UserRef>, LeaderboardError> {
        let state = self.state.read().await;
        state.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|user| (*id, user.clone())))
            .collect())
    }
}
