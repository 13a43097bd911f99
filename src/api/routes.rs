//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Clock, CreatorEntry, EventEntry, LeaderboardError, LeaderboardPeriod, LeaderboardRecord,
    RecordId,
};
use crate::error::AppResult;
use crate::service::LeaderboardService;
use crate::store::LeaderboardBackend;

/// Router state
pub type SharedService<B, C> = Arc<LeaderboardService<B, C>>;

// =========================================================================
// Request/Response types
// =========================================================================

/// Query parameters of `GET /leaderboard`, kept as text: unparsable values
/// fall back to the current period
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

impl LeaderboardQuery {
    /// Requested period; missing or unparsable parts come from `current`
    pub fn period(
        &self,
        current: LeaderboardPeriod,
    ) -> Result<LeaderboardPeriod, LeaderboardError> {
        let year = self
            .year
            .as_deref()
            .and_then(|y| y.trim().parse::<i32>().ok())
            .unwrap_or(current.year());
        let month = self
            .month
            .as_deref()
            .and_then(|m| m.trim().parse::<u32>().ok())
            .unwrap_or(current.month());

        LeaderboardPeriod::new(year, month)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorInput {
    pub user_id: RecordId,
    pub earnings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    pub wager_id: RecordId,
    pub earnings: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLeaderboardRequest {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub top_creators: Vec<CreatorInput>,
    #[serde(default)]
    pub top_events: Vec<EventInput>,
}

#[derive(Debug, Serialize)]
pub struct CreateLeaderboardResponse {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceEntriesRequest {
    #[serde(default)]
    pub top_creators: Vec<CreatorInput>,
    #[serde(default)]
    pub top_events: Vec<EventInput>,
}

fn creators_from(inputs: Vec<CreatorInput>) -> Vec<CreatorEntry> {
    inputs
        .into_iter()
        .map(|input| CreatorEntry::new(input.user_id, input.earnings))
        .collect()
}

fn events_from(inputs: Vec<EventInput>) -> Vec<EventEntry> {
    inputs
        .into_iter()
        .map(|input| EventEntry::new(input.wager_id, input.earnings))
        .collect()
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router<B, C>() -> Router<SharedService<B, C>>
where
    B: LeaderboardBackend + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/leaderboard", get(get_leaderboard::<B, C>))
        .route("/leaderboards", post(create_leaderboard::<B, C>))
        .route(
            "/leaderboards/:leaderboard_id/entries",
            put(replace_entries::<B, C>),
        )
}

// =========================================================================
// GET /leaderboard
// =========================================================================

/// Leaderboard for `?year=&month=`, defaulting to the current month.
///
/// A period with no leaderboard answers 200 with empty lists.
async fn get_leaderboard<B, C>(
    State(service): State<SharedService<B, C>>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardRecord>>
where
    B: LeaderboardBackend + 'static,
    C: Clock + 'static,
{
    let period = query.period(service.current_period())?;

    let lookup = service.get_by_period(period).await?;
    if !lookup.is_found() {
        tracing::debug!("No leaderboard stored for {}", period);
    }

    Ok(Json(lookup.into_record()))
}

// =========================================================================
// POST /leaderboards
// =========================================================================

async fn create_leaderboard<B, C>(
    State(service): State<SharedService<B, C>>,
    payload: Result<Json<CreateLeaderboardRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreateLeaderboardResponse>)>
where
    B: LeaderboardBackend + 'static,
    C: Clock + 'static,
{
    let Json(request) = payload?;
    let period = LeaderboardPeriod::new(request.year, request.month)?;
    let record = LeaderboardRecord::new(
        period,
        creators_from(request.top_creators),
        events_from(request.top_events),
    );

    let created = service.create_one(record).await?;

    tracing::info!("Leaderboard {} created for {}", created.id, period);

    Ok((
        StatusCode::CREATED,
        Json(CreateLeaderboardResponse {
            id: created.id,
            year: created.year,
            month: created.month,
        }),
    ))
}

// =========================================================================
// PUT /leaderboards/:leaderboard_id/entries
// =========================================================================

async fn replace_entries<B, C>(
    State(service): State<SharedService<B, C>>,
    leaderboard_id: Result<Path<RecordId>, PathRejection>,
    payload: Result<Json<ReplaceEntriesRequest>, JsonRejection>,
) -> AppResult<StatusCode>
where
    B: LeaderboardBackend + 'static,
    C: Clock + 'static,
{
    let Path(leaderboard_id) = leaderboard_id?;
    let Json(request) = payload?;
    service
        .update_entries(
            leaderboard_id,
            creators_from(request.top_creators),
            events_from(request.top_events),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
