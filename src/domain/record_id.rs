//! Record Identifiers
//!
//! Time-ordered identifiers (UUIDv7) whose creation second can be read back
//! from the identifier itself.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

/// Identifier shared by leaderboards, wagers and users.
///
/// The nil value stands for "unset".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new identifier stamped with `at`
    pub fn generate(at: DateTime<Utc>) -> Self {
        let secs = u64::try_from(at.timestamp()).unwrap_or(0);
        let ts = Timestamp::from_unix(NoContext, secs, at.timestamp_subsec_nanos());
        Self(Uuid::new_v7(ts))
    }

    /// The unset identifier
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Unix seconds embedded in the identifier.
    ///
    /// Identifiers without a timestamp (nil, random v4) report 0.
    pub fn created_at_unix(&self) -> u64 {
        self.0
            .get_timestamp()
            .map(|ts| ts.to_unix().0)
            .unwrap_or(0)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
