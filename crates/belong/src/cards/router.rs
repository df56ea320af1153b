use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::board::{BoardStore, CardSpec, ViewId};
use super::registry::CardId;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct MountRequest {
    cards: Vec<CardSpec>,
}

/// Endpoints for mounting card boards and toggling their cards.
pub fn board_router(store: Arc<BoardStore>) -> Router {
    Router::new()
        .route("/api/v1/boards", post(mount_handler))
        .route(
            "/api/v1/boards/:view_id",
            get(board_handler).delete(unmount_handler),
        )
        .route(
            "/api/v1/boards/:view_id/cards/:card_id/toggle",
            post(toggle_handler),
        )
        .with_state(store)
}

pub(crate) async fn mount_handler(
    State(store): State<Arc<BoardStore>>,
    Json(request): Json<MountRequest>,
) -> Response {
    match store.mount(request.cards) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn board_handler(
    State(store): State<Arc<BoardStore>>,
    Path(view_id): Path<Uuid>,
) -> Response {
    match store.get(ViewId(view_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn toggle_handler(
    State(store): State<Arc<BoardStore>>,
    Path((view_id, card_id)): Path<(Uuid, String)>,
) -> Response {
    match store.toggle(ViewId(view_id), &CardId(card_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn unmount_handler(
    State(store): State<Arc<BoardStore>>,
    Path(view_id): Path<Uuid>,
) -> Response {
    match store.unmount(ViewId(view_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
