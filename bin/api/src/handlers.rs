use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use memeproto_core::AppError;
use memeproto_storage::{
    self as storage,
    models::{ActivityFilter, EnrichedActivity, clamp_limit},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

// ─── Query Params ───────────────────────────────────────────────────────────

/// Raw query string; `limit` stays a string so junk falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

impl ActivityParams {
    pub fn resolve(&self) -> (ActivityFilter, i64) {
        (
            ActivityFilter::parse(self.kind.as_deref()),
            clamp_limit(self.limit.as_deref()),
        )
    }
}

// ─── Response Types ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ActivityResponse {
    success: bool,
    activities: Vec<EnrichedActivity>,
    count: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

/// Any failure is reported as an opaque 500.
pub struct ApiError(AppError);

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Activities API error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                success: false,
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ─── Handlers ───────────────────────────────────────────────────────────────

pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/activity — most recent non-failed activities, newest first.
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivityParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, limit) = params.resolve();
    let activities: Vec<EnrichedActivity> =
        storage::repos::get_recent_activities(&state.pool, filter, limit)
            .await?
            .into_iter()
            .map(EnrichedActivity::from)
            .collect();

    Ok(Json(ActivityResponse {
        success: true,
        count: activities.len(),
        activities,
    }))
}
