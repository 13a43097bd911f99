//! Leaderboard API Library
//!
//! Monthly creator and event leaderboards: storage, the read-time join,
//! display-name resolution and the HTTP surface.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod presenter;
pub mod service;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{
    Clock, CreatorEntry, DisplayIdentity, EventEntry, FixedClock, LeaderboardError,
    LeaderboardPeriod, LeaderboardRecord, PeriodLookup, RecordId, SystemClock,
};
pub use error::{AppError, AppResult};
pub use service::LeaderboardService;
