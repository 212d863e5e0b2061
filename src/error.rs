use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Application-level errors
///
/// An empty recommendation is not an error; services return `None` or an
/// empty list for that case.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid user identity: {0}")]
    InvalidUserIdentity(String),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Watch state unavailable: {0}")]
    WatchStateUnavailable(String),

    #[error("No active session found for user {0}")]
    NoActiveSession(Uuid),

    #[error("Playback dispatch failed: {0}")]
    PlaybackUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUserIdentity(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CatalogUnavailable(_) | AppError::WatchStateUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::NoActiveSession(_) => StatusCode::CONFLICT,
            AppError::PlaybackUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
