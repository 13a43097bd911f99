//! API module
//!
//! HTTP endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::domain::Clock;
use crate::store::LeaderboardBackend;

pub use routes::{create_router, SharedService};

/// Build the application router
pub fn build_router<B, C>(service: SharedService<B, C>) -> Router
where
    B: LeaderboardBackend + 'static,
    C: Clock + 'static,
{
    // Axum layers run outermost-last: request id -> trace -> logging -> handler
    Router::new()
        .route("/health", get(health_check))
        .merge(create_router::<B, C>())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
