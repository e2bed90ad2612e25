//! HTTP API handlers.

pub mod designer;
pub mod presets;
pub mod render;
pub mod templates;

use axum::{Json, http::StatusCode};

use crate::error::SchabloneError;

/// Map a core error to the status code of the failed collaborator.
pub(crate) fn status_for(error: &SchabloneError) -> StatusCode {
    match error {
        SchabloneError::AssetFetch(_) => StatusCode::BAD_GATEWAY,
        SchabloneError::Parse(_) => StatusCode::BAD_REQUEST,
        SchabloneError::Render(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SchabloneError::Store(_) | SchabloneError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Standard error body: `{"success": false, "error": "..."}`.
pub(crate) fn error_json(error: SchabloneError) -> (StatusCode, Json<serde_json::Value>) {
    (
        status_for(&error),
        Json(serde_json::json!({"success": false, "error": error.to_string()})),
    )
}
