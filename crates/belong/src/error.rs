use crate::cards::BoardError;
use crate::config::ConfigError;
use crate::flows::{ContactError, UnknownFlow};
use crate::intake::{IntakeError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every failure the site can surface. HTTP handlers render it as
/// `{"error": ...}` with a status chosen by kind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error(transparent)]
    UnknownFlow(#[from] UnknownFlow),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Contact(#[from] ContactError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownFlow(_)
            | AppError::Intake(IntakeError::Repository(RepositoryError::NotFound))
            | AppError::Board(BoardError::UnknownView(_))
            | AppError::Board(BoardError::UnknownCard(_)) => StatusCode::NOT_FOUND,
            AppError::Intake(IntakeError::Step(_))
            | AppError::Board(BoardError::DuplicateCard(_))
            | AppError::Contact(ContactError::Input(_))
            | AppError::Contact(ContactError::Incomplete(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Intake(IntakeError::Inactive(_))
            | AppError::Intake(IntakeError::Repository(RepositoryError::Conflict))
            | AppError::Contact(ContactError::Busy { .. }) => StatusCode::CONFLICT,
            AppError::Intake(IntakeError::Repository(RepositoryError::Unavailable(_)))
            | AppError::Board(BoardError::Unavailable)
            | AppError::Contact(ContactError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Intake(IntakeError::Wizard(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
