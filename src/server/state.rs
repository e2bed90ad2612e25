//! Server state and configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SchabloneError;
use crate::preview::EditorHandle;
use crate::store::{DirStore, MemoryStore, TemplateStore};

/// How long idle render and designer sessions survive, in seconds.
pub const SESSION_EXPIRATION_SECS: u64 = 600;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory for the template store. `None` keeps templates in memory
    /// for the lifetime of the process.
    pub store_dir: Option<PathBuf>,
}

/// A rendered document parked behind a one-shot download URL.
pub struct RenderSession {
    pub pdf: Vec<u8>,
    pub filename: String,
    pub created: Instant,
}

impl RenderSession {
    pub fn new(pdf: Vec<u8>, filename: String) -> Self {
        Self {
            pdf,
            filename,
            created: Instant::now(),
        }
    }
}

/// One open designer: a live preview channel plus the theme markup it
/// rebuilds templates from.
pub struct DesignerSession {
    pub handle: EditorHandle,
    pub markup: String,
    pub last_accessed: Instant,
}

impl DesignerSession {
    pub fn new(handle: EditorHandle, markup: String) -> Self {
        Self {
            handle,
            markup,
            last_accessed: Instant::now(),
        }
    }

    /// Mark the session as recently used to keep it alive.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<dyn TemplateStore>,
    pub http_client: reqwest::Client,
    pub render_sessions: RwLock<HashMap<Uuid, RenderSession>>,
    pub designer_sessions: RwLock<HashMap<Uuid, DesignerSession>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, SchabloneError> {
        let store: Arc<dyn TemplateStore> = match &config.store_dir {
            Some(dir) => Arc::new(DirStore::new(dir.clone())),
            None => Arc::new(MemoryStore::new()),
        };
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("schablone/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SchabloneError::AssetFetch(format!("HTTP client error: {e}")))?;
        Ok(Self {
            config,
            store,
            http_client,
            render_sessions: RwLock::new(HashMap::new()),
            designer_sessions: RwLock::new(HashMap::new()),
        })
    }
}
