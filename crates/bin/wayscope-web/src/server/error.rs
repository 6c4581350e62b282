use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use wayscope_input::catalog::CatalogError;
use wayscope_input::index::IndexError;
use wayscope_input::session::SessionError;

/// Handler-level failure, rendered as the uniform envelope
/// `{"success": false, "error": ...}` with a matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no record file is loaded")]
    NoSessionLoaded,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoSessionLoaded | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            SessionError::MalformedRecord { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::FolderNotFound(_) => ApiError::NotFound(e.to_string()),
            CatalogError::Io(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<IndexError> for ApiError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::NotBuilt => ApiError::BadRequest(e.to_string()),
        }
    }
}
