//! Stored Document Shapes
//!
//! What the collections hold. Entries are stored without any identity data;
//! titles, authors and user fields are joined in on every read.

use serde::{Deserialize, Serialize};

use crate::domain::{CreatorEntry, EventEntry, LeaderboardRecord, RecordId};

/// Leaderboard as persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardDocument {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
    pub top_creators: Vec<StoredCreator>,
    pub top_events: Vec<StoredEvent>,
}

impl LeaderboardDocument {
    /// Document form of a record; display identities are dropped
    pub fn from_record(record: &LeaderboardRecord) -> Self {
        Self {
            id: record.id,
            year: record.year,
            month: record.month,
            top_creators: record.top_creators.iter().map(StoredCreator::from).collect(),
            top_events: record.top_events.iter().map(StoredEvent::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCreator {
    pub user_id: RecordId,
    pub earnings: i64,
}

impl From<&CreatorEntry> for StoredCreator {
    fn from(entry: &CreatorEntry) -> Self {
        Self {
            user_id: entry.user_id,
            earnings: entry.earnings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub wager_id: RecordId,
    pub earnings: i64,
}

impl From<&EventEntry> for StoredEvent {
    fn from(entry: &EventEntry) -> Self {
        Self {
            wager_id: entry.wager_id,
            earnings: entry.earnings,
        }
    }
}

/// Wager fields needed by the event join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WagerRef {
    pub id: RecordId,
    pub title: String,
    pub author_id: Option<RecordId>,
}

/// User fields needed by the identity join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub avatar: String,
}
