//! # HTTP Server for the Template Engine
//!
//! Serves the preset catalog, saved-template CRUD, rendering with one-shot
//! download URLs, theme compilation, and designer sessions over the live
//! preview channel.
//!
//! ## Usage
//!
//! ```bash
//! schablone serve --listen 0.0.0.0:8080 --store-dir ./templates
//! ```

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::error::SchabloneError;
use state::{AppState, SESSION_EXPIRATION_SECS};

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use schablone::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), schablone::error::SchabloneError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     store_dir: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), SchabloneError> {
    let app_state = Arc::new(AppState::new(config.clone())?);

    // Spawn background session cleanup task
    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = Router::new()
        // Preset catalog
        .route("/api/presets", get(handlers::presets::list))
        .route("/api/presets/:name", get(handlers::presets::get))
        // Saved templates
        .route(
            "/api/templates",
            get(handlers::templates::list).post(handlers::templates::save),
        )
        .route(
            "/api/templates/:id",
            get(handlers::templates::get).delete(handlers::templates::delete),
        )
        .route("/api/templates/:id/export", get(handlers::templates::export))
        .route("/api/templates/import", post(handlers::templates::import))
        // Base-document upload (20MB limit)
        .route(
            "/api/templates/base-document",
            post(handlers::templates::upload_base)
                .layer(DefaultBodyLimit::max(20 * 1024 * 1024)),
        )
        // Rendering
        .route("/api/render", post(handlers::render::render))
        .route("/api/render/:id/download", get(handlers::render::download))
        // Theme compiler
        .route("/api/compile", post(handlers::designer::compile))
        // Designer sessions (live preview)
        .route("/api/designer", post(handlers::designer::open))
        .route("/api/designer/:id/colors", post(handlers::designer::colors))
        .route(
            "/api/designer/:id/preview",
            get(handlers::designer::preview),
        )
        .route(
            "/api/designer/:id",
            axum::routing::delete(handlers::designer::close),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!(listen = %config.listen_addr, "schablone HTTP server starting");
    match &config.store_dir {
        Some(dir) => tracing::info!(store = %dir.display(), "using directory store"),
        None => tracing::info!("using in-memory store"),
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            SchabloneError::Store(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| SchabloneError::Store(format!("Server error: {}", e)))?;

    Ok(())
}

/// Background task to clean up expired sessions.
///
/// Render sessions that were never downloaded and designer sessions with
/// no recent activity are dropped; dropping a designer session's handle
/// ends its preview task.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let now = Instant::now();

        {
            let mut sessions = state.render_sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, v| now.duration_since(v.created) < expiration);
            let after = sessions.len();
            if before != after {
                tracing::info!(
                    expired = before - after,
                    remaining = after,
                    "cleaned up render sessions"
                );
            }
        }

        {
            let mut sessions = state.designer_sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, v| now.duration_since(v.last_accessed) < expiration);
            let after = sessions.len();
            if before != after {
                tracing::info!(
                    expired = before - after,
                    remaining = after,
                    "cleaned up designer sessions"
                );
            }
        }
    }
}
