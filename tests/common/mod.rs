//! Common test utilities
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use leaderboard_api::api;
use leaderboard_api::store::{MemoryBackend, UserRef, WagerRef};
use leaderboard_api::{FixedClock, LeaderboardService, RecordId};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

/// "Now" for every test: 2024-03-10 08:00:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(now())
}

/// Id whose embedded creation time is `unix_secs`
pub fn id_created_at(unix_secs: i64) -> RecordId {
    RecordId::generate(Utc.timestamp_opt(unix_secs, 0).unwrap())
}

pub fn user(id: RecordId, username: &str, email: &str, avatar: &str) -> UserRef {
    UserRef {
        id,
        username: username.to_string(),
        email: email.to_string(),
        avatar: avatar.to_string(),
    }
}

pub fn wager(id: RecordId, title: &str, author_id: RecordId) -> WagerRef {
    WagerRef {
        id,
        title: title.to_string(),
        author_id: Some(author_id),
    }
}

/// Router over an in-memory backend, plus the backend handle for seeding
pub fn memory_app() -> (Router, MemoryBackend) {
    let backend = MemoryBackend::new();
    let service = Arc::new(LeaderboardService::new(backend.clone(), fixed_clock()));
    (api::build_router(service), backend)
}

/// Connect to `DATABASE_URL` and apply the schema.
///
/// Returns `None` when no database is configured so Postgres tests can skip.
pub async fn setup_test_db() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    pool.execute(include_str!("../../migrations/0001_leaderboard.sql"))
        .await
        .expect("Failed to apply schema");

    Some(pool)
}

/// Year no other test run uses, so tests can share one database
pub fn unique_year() -> i32 {
    3000 + (uuid::Uuid::new_v4().as_u128() % 1_000_000) as i32
}
