//! Designer session and theme compiler handlers.
//!
//! A designer session is the server-side editor end of the live preview
//! channel: opening one fetches the theme markup once, then every color
//! update rebuilds and re-renders against that markup in the preview task.
//! The preview endpoint serves the latest rendered frame.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::color::Palette;
use crate::compiler;
use crate::error::SchabloneError;
use crate::preview::{EditorHandle, PreviewMessage};
use crate::template::Template;

use super::error_json;
use super::super::state::{AppState, DesignerSession};

/// Longest a preview fetch waits for the requested frame.
const FRAME_WAIT: Duration = Duration::from_secs(10);

/// Request body for compiling a theme or opening a designer session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    pub asset_url: String,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub circle_color: Option<String>,
}

impl ThemeRequest {
    fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        palette.merge(
            self.primary_color.as_deref(),
            self.accent_color.as_deref(),
            self.circle_color.as_deref(),
        );
        palette
    }
}

/// Response from opening a designer session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenResponse {
    pub id: String,
    pub palette: Palette,
}

/// POST /api/compile - Compile a theme asset into a template.
///
/// Stateless: fetches the asset (cache-busted), applies the palette, and
/// returns the full template without persisting anything.
pub async fn compile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<Template>, (StatusCode, Json<serde_json::Value>)> {
    compiler::compile_theme(&state.http_client, &req.asset_url, &req.palette())
        .await
        .map(Json)
        .map_err(error_json)
}

/// POST /api/designer - Open a designer session over a theme asset.
///
/// The markup is fetched once here; the preview rebuilds from the cached
/// markup on every color update, so only opening touches the network.
/// Responds after the preview's readiness handshake.
pub async fn open(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<OpenResponse>, (StatusCode, Json<serde_json::Value>)> {
    let markup = compiler::fetch_markup(&state.http_client, &req.asset_url)
        .await
        .map_err(error_json)?;
    let palette = req.palette();

    let builder = {
        let markup = markup.clone();
        Arc::new(move |palette: &Palette| compiler::compile_markup(&markup, palette))
    };
    let handle = EditorHandle::spawn_with(
        builder,
        Arc::new(crate::generate::PdfBackend::default()),
        palette.clone(),
    );
    handle.ready().await;

    let id = Uuid::new_v4();
    tracing::info!(%id, asset = %req.asset_url, "designer session opened");
    let mut sessions = state.designer_sessions.write().await;
    sessions.insert(id, DesignerSession::new(handle, markup));

    Ok(Json(OpenResponse {
        id: id.to_string(),
        palette,
    }))
}

/// Response from a color update: the assigned sequence number and the
/// merged palette the next frame will use.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorsResponse {
    pub seq: u64,
    pub palette: Palette,
}

/// POST /api/designer/:id/colors - Apply an updateColors wire message.
///
/// Partial: an omitted color keeps its current value. Fire-and-forget on
/// the render side; the response confirms receipt, not completion.
pub async fn colors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(message): Json<PreviewMessage>,
) -> Result<Json<ColorsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let PreviewMessage::UpdateColors {
        primary_color,
        accent_color,
        ..
    } = &message
    else {
        return Err(error_json(SchabloneError::Parse(
            "expected an updateColors message".into(),
        )));
    };

    let session_id = parse_session_id(&id)?;
    let mut sessions = state.designer_sessions.write().await;
    let session = sessions.get_mut(&session_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"success": false, "error": "Designer session not found"})),
        )
    })?;
    session.touch();

    let seq = session
        .handle
        .update_colors(primary_color.as_deref(), accent_color.as_deref());
    Ok(Json(ColorsResponse {
        seq,
        palette: session.handle.palette(),
    }))
}

/// Query parameters for the preview endpoint.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Wait for a frame rendered from this sequence number or newer.
    /// Absent serves the latest frame immediately.
    pub seq: Option<u64>,
}

/// GET /api/designer/:id/preview - Fetch the preview's rendered PDF.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?;

    // Grab a frame receiver under the lock, wait outside it so color
    // updates stay unblocked while we wait
    let mut frames = {
        let mut sessions = state.designer_sessions.write().await;
        let session = sessions.get_mut(&session_id).ok_or((
            StatusCode::NOT_FOUND,
            "Designer session not found".to_string(),
        ))?;
        session.touch();
        session.handle.frames()
    };

    let frame = match query.seq {
        Some(seq) => {
            let waited = tokio::time::timeout(
                FRAME_WAIT,
                frames.wait_for(|frame| frame.as_ref().is_some_and(|f| f.seq >= seq)),
            )
            .await;
            match waited {
                Ok(Ok(frame)) => frame.clone(),
                Ok(Err(_)) => None,
                Err(_) => {
                    return Err((
                        StatusCode::GATEWAY_TIMEOUT,
                        "Preview render did not finish in time".to_string(),
                    ));
                }
            }
        }
        None => frames.borrow().clone(),
    };

    let frame = frame.ok_or((
        StatusCode::NOT_FOUND,
        "No preview frame rendered yet".to_string(),
    ))?;

    Ok((
        [(header::CONTENT_TYPE, "application/pdf".to_string())],
        frame.pdf.as_ref().clone(),
    ))
}

/// DELETE /api/designer/:id - Close a session and tear the preview down.
pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let session_id = parse_session_id(&id)?;
    let session = {
        let mut sessions = state.designer_sessions.write().await;
        sessions.remove(&session_id)
    }
    .ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"success": false, "error": "Designer session not found"})),
        )
    })?;

    session.handle.shutdown().await;
    tracing::info!(%id, "designer session closed");
    Ok(Json(serde_json::json!({"success": true})))
}

fn parse_session_id(id: &str) -> Result<Uuid, (StatusCode, Json<serde_json::Value>)> {
    Uuid::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"success": false, "error": "Invalid session ID"})),
        )
    })
}
