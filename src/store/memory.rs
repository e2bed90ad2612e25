//! In-memory template store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SchabloneError;
use crate::store::{SavedTemplateRecord, TemplateStore};

/// Process-local store backed by a map. State is gone when the process
/// exits; used by tests and by servers running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, SavedTemplateRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn save(&self, record: SavedTemplateRecord) -> Result<(), SchabloneError> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SavedTemplateRecord>, SchabloneError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<SavedTemplateRecord>, SchabloneError> {
        let records = self.records.read().await;
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn delete(&self, id: &str) -> Result<bool, SchabloneError> {
        let mut records = self.records.write().await;
        Ok(records.remove(id).is_some())
    }
}
