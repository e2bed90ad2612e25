//! Saved template CRUD, import/export, and base-document upload handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::SchabloneError;
use crate::store::{self, SavedTemplateRecord};
use crate::template::{Template, transfer};

use super::error_json;
use super::super::state::AppState;

/// Request body for saving a template under a display name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    pub template: Template,
}

/// GET /api/templates - List all saved records, ordered by name.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SavedTemplateRecord>>, (StatusCode, Json<serde_json::Value>)> {
    state.store.list().await.map(Json).map_err(error_json)
}

/// GET /api/templates/:id - Fetch one saved record.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SavedTemplateRecord>, (StatusCode, Json<serde_json::Value>)> {
    match state.store.get(&id).await.map_err(error_json)? {
        Some(record) => Ok(Json(record)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"success": false, "error": format!("No template '{}'", id)})),
        )),
    }
}

/// POST /api/templates - Save a template under a display name.
///
/// The record id is the slug of the name, so re-saving an existing name
/// overwrites the prior record (last-write-wins).
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SavedTemplateRecord>, (StatusCode, Json<serde_json::Value>)> {
    if req.name.trim().is_empty() {
        return Err(error_json(SchabloneError::Parse(
            "template name must not be empty".into(),
        )));
    }
    let record = store::persist(state.store.as_ref(), &req.name, &req.template)
        .await
        .map_err(error_json)?;
    tracing::info!(id = %record.id, "template saved");
    Ok(Json(record))
}

/// DELETE /api/templates/:id - Remove a saved record.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let existed = state.store.delete(&id).await.map_err(error_json)?;
    if !existed {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"success": false, "error": format!("No template '{}'", id)})),
        ));
    }
    tracing::info!(id = %id, "template deleted");
    Ok(Json(serde_json::json!({"success": true})))
}

/// GET /api/templates/:id/export - Download a record's template as a
/// pretty-printed JSON file named `<Name with spaces→underscores>.json`.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let record = match state.store.get(&id).await.map_err(error_json)? {
        Some(record) => record,
        None => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(
                    serde_json::json!({"success": false, "error": format!("No template '{}'", id)}),
                ),
            ));
        }
    };
    let json = transfer::export_json(&record.template).map_err(error_json)?;
    let filename = transfer::export_file_name(&record.name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        json,
    ))
}

/// POST /api/templates/import - Parse an exported JSON file.
///
/// Returns the parsed template without persisting it; invalid JSON is a
/// 400 and nothing stored changes.
pub async fn import(
    body: String,
) -> Result<Json<Template>, (StatusCode, Json<serde_json::Value>)> {
    transfer::import_json(&body).map(Json).map_err(error_json)
}

/// POST /api/templates/base-document - Replace a template's base document.
///
/// Multipart form with a `template` part (the current template as JSON)
/// and a `document` file part. The uploaded bytes become the embedded base
/// as a data URI; pages and page size are preserved.
pub async fn upload_base(
    mut multipart: Multipart,
) -> Result<Json<Template>, (StatusCode, Json<serde_json::Value>)> {
    let mut template: Option<Template> = None;
    let mut document: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_json(SchabloneError::Parse(format!("multipart error: {e}"))))?
    {
        match field.name().unwrap_or("") {
            "template" => {
                let text = field.text().await.map_err(|e| {
                    error_json(SchabloneError::Parse(format!("template part unreadable: {e}")))
                })?;
                template = Some(transfer::import_json(&text).map_err(error_json)?);
            }
            "document" => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/pdf")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    error_json(SchabloneError::Parse(format!("document part unreadable: {e}")))
                })?;
                document = Some((mime, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let template = template
        .ok_or_else(|| error_json(SchabloneError::Parse("missing 'template' part".into())))?;
    let (mime, bytes) = document
        .ok_or_else(|| error_json(SchabloneError::Parse("missing 'document' part".into())))?;

    let (width, height) = template.page_size();
    let updated = template.with_base_document(transfer::embedded_base(&mime, &bytes, width, height));
    Ok(Json(updated))
}
