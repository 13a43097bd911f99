//! PostgreSQL Backend
//!
//! Leaderboards keep their entry lists as JSONB arrays on a single row, so a
//! replace is one conditional UPDATE. Wagers and users are separate tables
//! looked up in batches with `= ANY($1)`.

use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{LeaderboardError, LeaderboardPeriod, RecordId};

use super::{
    LeaderboardCollection, LeaderboardDocument, StoredCreator, StoredEvent, UserLookup, UserRef,
    WagerLookup, WagerRef,
};

type LeaderboardRow = (
    RecordId,
    i32,
    i32,
    Json<Vec<StoredCreator>>,
    Json<Vec<StoredEvent>>,
);

/// Postgres-backed collections
#[derive(Debug, Clone)]
pub struct PgLeaderboardBackend {
    pool: PgPool,
}

impl PgLeaderboardBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_uuids(ids: &[RecordId]) -> Vec<Uuid> {
    ids.iter().map(RecordId::as_uuid).collect()
}

impl LeaderboardCollection for PgLeaderboardBackend {
    async fn insert_one(&self, document: &LeaderboardDocument) -> Result<(), LeaderboardError> {
        let month = i32::try_from(document.month)
            .map_err(|_| LeaderboardError::invalid_argument("month out of range"))?;

        sqlx::query(
            r#"
            INSERT INTO leaderboards (id, year, month, top_creators, top_events)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(document.id)
        .bind(document.year)
        .bind(month)
        .bind(Json(&document.top_creators))
        .bind(Json(&document.top_events))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_period(
        &self,
        period: LeaderboardPeriod,
    ) -> Result<Vec<LeaderboardDocument>, LeaderboardError> {
        let rows: Vec<LeaderboardRow> = sqlx::query_as(
            r#"
            SELECT id, year, month, top_creators, top_events
            FROM leaderboards
            WHERE year = $1 AND month = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(period.year())
        .bind(period.month() as i32)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, year, month, creators, events)| LeaderboardDocument {
                id,
                year,
                month: month.max(0) as u32,
                top_creators: creators.0,
                top_events: events.0,
            })
            .collect())
    }

    async fn update_entries(
        &self,
        id: RecordId,
        top_creators: &[StoredCreator],
        top_events: &[StoredEvent],
    ) -> Result<u64, LeaderboardError> {
        let result = sqlx::query(
            r#"
            UPDATE leaderboards
            SET top_creators = $2, top_events = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(top_creators))
        .bind(Json(top_events))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl WagerLookup for PgLeaderboardBackend {
    async fn find_wagers(
        &self,
        ids: &[RecordId],
    ) -> Result<HashMap<RecordId, WagerRef>, LeaderboardError> {
        let rows: Vec<(RecordId, String, Option<RecordId>)> = sqlx::query_as(
            r#"
            SELECT id, COALESCE(title, ''), author_id
            FROM wagers
            WHERE id = ANY($1)
            "#,
        )
        .bind(to_uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, title, author_id)| {
                (
                    id,
                    WagerRef {
                        id,
                        title,
                        author_id,
                    },
                )
            })
            .collect())
    }
}

impl UserLookup for PgLeaderboardBackend {
    async fn find_users(
        &self,
        ids: &[RecordId],
    ) -> Result<HashMap<RecordId, UserRef>, LeaderboardError> {
        let rows: Vec<(RecordId, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, COALESCE(username, ''), COALESCE(email, ''), COALESCE(avatar, '')
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(to_uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, username, email, avatar)| {
                (
                    id,
                    UserRef {
                        id,
                        username,
                        email,
                        avatar,
                    },
                )
            })
            .collect())
    }
}
