//! Preset catalog API handlers.

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
};

use crate::catalog;
use crate::template::Template;

/// GET /api/presets - List built-in preset names.
pub async fn list() -> Json<Vec<&'static str>> {
    Json(catalog::preset_names())
}

/// GET /api/presets/:name - Build a fresh template for a preset.
///
/// Every call returns an independent copy; the caller can edit it without
/// affecting later loads.
pub async fn get(Path(name): Path<String>) -> Result<Json<Template>, (StatusCode, String)> {
    catalog::by_name(&name)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("Preset '{}' not found", name)))
}
