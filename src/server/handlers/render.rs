//! Render API handlers.
//!
//! Rendering does not stream the PDF straight back: the bytes are parked
//! behind a one-shot download URL so a viewer can fetch them with a plain
//! GET. A download consumes its session; expired sessions are swept by the
//! server's cleanup task.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::generate::{self, InputRecord};
use crate::template::{Template, transfer};

use super::error_json;
use super::super::state::{AppState, RenderSession};

/// Request body for the render endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template: Template,
    /// One record per rendered copy. Empty renders a single copy with the
    /// template's default content.
    #[serde(default)]
    pub inputs: Vec<InputRecord>,
    /// Display name used for the download filename.
    #[serde(default)]
    pub name: Option<String>,
}

/// Response from the render endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub id: String,
    pub download_url: String,
    pub filename: String,
    pub size_bytes: usize,
}

/// POST /api/render - Render a template and park the PDF for download.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, (StatusCode, Json<serde_json::Value>)> {
    let pdf = generate::render(&req.template, &req.inputs).map_err(error_json)?;

    let display_name = req.name.as_deref().unwrap_or("template");
    let filename = transfer::export_file_name(display_name).replace(".json", ".pdf");
    let id = Uuid::new_v4();
    let size_bytes = pdf.len();

    tracing::info!(
        %id,
        copies = req.inputs.len().max(1),
        size_bytes,
        "rendered template"
    );

    let mut sessions = state.render_sessions.write().await;
    sessions.insert(id, RenderSession::new(pdf, filename.clone()));

    Ok(Json(RenderResponse {
        id: id.to_string(),
        download_url: format!("/api/render/{id}/download"),
        filename,
        size_bytes,
    }))
}

/// GET /api/render/:id/download - Fetch a parked PDF, consuming its URL.
///
/// One shot: the session is removed before the bytes go out, so a second
/// GET of the same URL is a 404.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?;

    let session = {
        let mut sessions = state.render_sessions.write().await;
        sessions.remove(&session_id)
    }
    .ok_or((
        StatusCode::NOT_FOUND,
        "Download expired or already used".to_string(),
    ))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", session.filename),
            ),
        ],
        session.pdf,
    ))
}
