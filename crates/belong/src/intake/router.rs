use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::repository::{SessionId, SessionRecord, SessionRepository, SubmissionSink};
use super::service::{AdvanceEvent, IntakeError, IntakeService};
use super::view::{FlowSummary, SessionView};
use crate::error::AppError;
use crate::flows::FlowKind;
use crate::wizard::FieldPatch;

#[derive(Debug, Serialize)]
pub(crate) struct AdvanceResponse {
    #[serde(flatten)]
    event: AdvanceEvent,
    session: SessionView,
}

/// Router builder exposing the inquiry wizards over HTTP.
pub fn intake_router<R, S>(service: Arc<IntakeService<R, S>>) -> Router
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    Router::new()
        .route("/api/v1/flows", get(flows_handler))
        .route("/api/v1/flows/:flow/sessions", post(open_handler::<R, S>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R, S>).delete(close_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/fields",
            patch(update_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/advance",
            post(advance_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/retreat",
            post(retreat_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/cancel",
            post(cancel_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/reopen",
            post(reopen_handler::<R, S>),
        )
        .with_state(service)
}

fn session_response(
    status: StatusCode,
    result: Result<SessionRecord, IntakeError>,
) -> Response {
    match result {
        Ok(record) => (status, Json(SessionView::from(&record))).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn flows_handler() -> Json<Vec<FlowSummary>> {
    Json(FlowKind::ALL.into_iter().map(FlowSummary::from).collect())
}

pub(crate) async fn open_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(flow): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    let flow = match flow.parse::<FlowKind>() {
        Ok(flow) => flow,
        Err(error) => return AppError::from(error).into_response(),
    };
    session_response(StatusCode::CREATED, service.open(flow))
}

pub(crate) async fn session_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    session_response(StatusCode::OK, service.get(&SessionId(session_id)))
}

pub(crate) async fn update_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
    Json(patch): Json<FieldPatch>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    session_response(
        StatusCode::OK,
        service.update(&SessionId(session_id), patch),
    )
}

pub(crate) async fn advance_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.advance(&SessionId(session_id)).await {
        Ok(outcome) => {
            let body = AdvanceResponse {
                event: outcome.event,
                session: SessionView::from(&outcome.record),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn retreat_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    session_response(StatusCode::OK, service.retreat(&SessionId(session_id)))
}

pub(crate) async fn cancel_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    session_response(StatusCode::OK, service.cancel(&SessionId(session_id)))
}

pub(crate) async fn reopen_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    session_response(StatusCode::OK, service.reopen(&SessionId(session_id)))
}

pub(crate) async fn close_handler<R, S>(
    State(service): State<Arc<IntakeService<R, S>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
