//! Leaderboard Types
//!
//! The monthly leaderboard aggregate and its ranked entries.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::{LeaderboardError, RecordId};

/// Year and month identifying one leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LeaderboardPeriod {
    year: i32,
    month: u32,
}

impl LeaderboardPeriod {
    /// Create a period, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, LeaderboardError> {
        if !(1..=12).contains(&month) {
            return Err(LeaderboardError::invalid_argument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Calendar period containing `at`
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Identity shown next to an entry.
///
/// `username` and `email` are joined in at read time and never leave the
/// process; only `display_name` and `avatar` are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayIdentity {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(skip)]
    pub username: String,
    #[serde(skip)]
    pub email: String,
    pub avatar: String,
}

impl DisplayIdentity {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            display_name: String::new(),
            username: username.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }
}

/// A ranked creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorEntry {
    #[serde(skip)]
    pub user_id: RecordId,
    pub earnings: i64,
    #[serde(flatten)]
    pub identity: DisplayIdentity,
}

impl CreatorEntry {
    pub fn new(user_id: RecordId, earnings: i64) -> Self {
        Self {
            user_id,
            earnings,
            identity: DisplayIdentity::default(),
        }
    }
}

/// A ranked event (wager)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry {
    #[serde(skip)]
    pub wager_id: RecordId,
    /// Author of the wager, joined at read time
    #[serde(skip)]
    pub user_id: RecordId,
    pub title: String,
    pub earnings: i64,
    #[serde(flatten)]
    pub identity: DisplayIdentity,
}

impl EventEntry {
    pub fn new(wager_id: RecordId, earnings: i64) -> Self {
        Self {
            wager_id,
            user_id: RecordId::nil(),
            title: String::new(),
            earnings,
            identity: DisplayIdentity::default(),
        }
    }
}

/// Leaderboard aggregate for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRecord {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
    pub top_creators: Vec<CreatorEntry>,
    pub top_events: Vec<EventEntry>,
}

impl LeaderboardRecord {
    /// New, not yet persisted record
    pub fn new(
        period: LeaderboardPeriod,
        top_creators: Vec<CreatorEntry>,
        top_events: Vec<EventEntry>,
    ) -> Self {
        Self {
            id: RecordId::nil(),
            year: period.year(),
            month: period.month(),
            top_creators,
            top_events,
        }
    }

    /// Record with no entries, handed out when a period has no leaderboard
    pub fn empty(period: LeaderboardPeriod) -> Self {
        Self::new(period, Vec::new(), Vec::new())
    }
}

/// Outcome of reading a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodLookup {
    Found(LeaderboardRecord),
    /// Nothing stored for the period; carries an empty record callers can use as-is
    Missing(LeaderboardRecord),
}

impl PeriodLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn record(&self) -> &LeaderboardRecord {
        match self {
            Self::Found(record) | Self::Missing(record) => record,
        }
    }

    pub fn record_mut(&mut self) -> &mut LeaderboardRecord {
        match self {
            Self::Found(record) | Self::Missing(record) => record,
        }
    }

    /// Record regardless of whether it was found
    pub fn into_record(self) -> LeaderboardRecord {
        match self {
            Self::Found(record) | Self::Missing(record) => record,
        }
    }

    /// Turn a miss into `LeaderboardError::NotFound`
    pub fn into_result(self) -> Result<LeaderboardRecord, LeaderboardError> {
        match self {
            Self::Found(record) => Ok(record),
            Self::Missing(record) => Err(LeaderboardError::not_found(format!(
                "{:04}-{:02}",
                record.year, record.month
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_validation() {
        assert!(LeaderboardPeriod::new(2024, 1).is_ok());
        assert!(LeaderboardPeriod::new(2024, 12).is_ok());

        let err = LeaderboardPeriod::new(2024, 0).unwrap_err();
        assert!(matches!(err, LeaderboardError::InvalidArgument(_)));
        assert!(LeaderboardPeriod::new(2024, 13).is_err());
    }

    #[test]
    fn test_period_containing() {
        let at = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let period = LeaderboardPeriod::containing(at);

        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2024-03");
    }

    #[test]
    fn test_empty_record_has_zero_length_entries() {
        let record = LeaderboardRecord::empty(LeaderboardPeriod::new(2024, 3).unwrap());

        assert!(record.id.is_nil());
        assert_eq!(record.year, 2024);
        assert_eq!(record.month, 3);
        assert!(record.top_creators.is_empty());
        assert!(record.top_events.is_empty());
    }

    #[test]
    fn test_missing_lookup_into_result() {
        let period = LeaderboardPeriod::new(2023, 7).unwrap();
        let lookup = PeriodLookup::Missing(LeaderboardRecord::empty(period));

        assert!(!lookup.is_found());
        let err = lookup.into_result().unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("2023-07"));
    }

    #[test]
    fn test_serialization_hides_raw_identity() {
        let mut creator = CreatorEntry::new(RecordId::generate(Utc::now()), 500);
        creator.identity = DisplayIdentity::new("alice", "alice@example.com", "https://cdn/a.png");
        creator.identity.display_name = "alice".to_string();

        let mut event = EventEntry::new(RecordId::generate(Utc::now()), 75);
        event.title = "Will it rain?".to_string();
        event.identity = DisplayIdentity::new("", "bob@example.com", "");
        event.identity.display_name = "*ob@example.com".to_string();

        let mut record = LeaderboardRecord::empty(LeaderboardPeriod::new(2024, 3).unwrap());
        record.top_creators.push(creator);
        record.top_events.push(event);

        let json = serde_json::to_value(&record).unwrap();
        let creator_json = &json["top_creators"][0];
        assert_eq!(creator_json["name"], "alice");
        assert_eq!(creator_json["earnings"], 500);
        assert_eq!(creator_json["avatar"], "https://cdn/a.png");
        assert!(creator_json.get("username").is_none());
        assert!(creator_json.get("email").is_none());
        assert!(creator_json.get("user_id").is_none());

        let event_json = &json["top_events"][0];
        assert_eq!(event_json["title"], "Will it rain?");
        assert_eq!(event_json["name"], "*ob@example.com");
        assert!(event_json.get("wager_id").is_none());
        assert!(event_json.get("email").is_none());
    }
}
