use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use belong::cards::{board_router, BoardStore};
use belong::intake::{intake_router, IntakeService, SessionRepository, SubmissionSink};
use serde_json::json;
use std::sync::Arc;

/// Wizard and card routes of the site plus the operational endpoints.
pub(crate) fn with_site_routes<R, S>(
    intake: Arc<IntakeService<R, S>>,
    boards: Arc<BoardStore>,
) -> Router
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    intake_router(intake)
        .merge(board_router(boards))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
