//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::db;
use crate::errors::Result;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

/// Build the API router over `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/campaigns/:id/events", get(get_campaign_events))
        .route("/accounts/:address/events", get(get_account_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CampaignEventsResponse {
    pub campaign_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AccountEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /campaigns/:id/events`
///
/// Returns all indexed events for the given campaign identifier.
pub async fn get_campaign_events(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<String>,
) -> Response {
    respond(db::get_events_for_campaign(&state.pool, &campaign_id).await, |events| {
        CampaignEventsResponse {
            campaign_id,
            count: events.len(),
            events,
        }
    })
}

/// `GET /accounts/:address/events`
///
/// Donations, withdrawals and ledger movements involving an address.
pub async fn get_account_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    respond(db::get_events_for_actor(&state.pool, &address).await, |events| {
        AccountEventsResponse {
            address,
            count: events.len(),
            events,
        }
    })
}

/// `GET /events`
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    respond(db::get_all_events(&state.pool).await, |events| AllEventsResponse {
        count: events.len(),
        events,
    })
}

fn respond<T, F>(result: Result<Vec<EventRecord>>, shape: F) -> Response
where
    T: Serialize,
    F: FnOnce(Vec<EventRecord>) -> T,
{
    match result {
        Ok(events) => (StatusCode::OK, Json(shape(events))).into_response(),
        Err(e) => {
            error!("API query failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
