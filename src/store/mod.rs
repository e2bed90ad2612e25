//! # Template Store
//!
//! Persistence boundary for named templates. The core treats the store as
//! a keyed map with last-write-wins semantics: the record id is derived
//! from the display name, so saving under an existing name overwrites the
//! prior record. There are no transactions across records and no
//! optimistic-concurrency checks.
//!
//! Two implementations ship here: [`MemoryStore`] for tests and ephemeral
//! servers, [`DirStore`] for a directory of JSON files. Anything else
//! (a database, a hosted document store) plugs in through the
//! [`TemplateStore`] trait; core code only ever sees the trait.

pub mod dir;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchabloneError;
use crate::template::Template;

pub use dir::DirStore;
pub use memory::MemoryStore;

/// A stored template with its catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplateRecord {
    /// Slug derived from `name`; the storage key.
    pub id: String,
    /// Display name as the user typed it.
    pub name: String,
    pub template: Template,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Keyed template persistence.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Insert or overwrite the record under `record.id`.
    async fn save(&self, record: SavedTemplateRecord) -> Result<(), SchabloneError>;

    /// Fetch one record by id.
    async fn get(&self, id: &str) -> Result<Option<SavedTemplateRecord>, SchabloneError>;

    /// All records, ordered by display name.
    async fn list(&self) -> Result<Vec<SavedTemplateRecord>, SchabloneError>;

    /// Remove a record. Returns whether it existed.
    async fn delete(&self, id: &str) -> Result<bool, SchabloneError>;
}

/// Derive the storage id from a display name: lowercase, spaces to
/// hyphens. Deterministic, so the same name always lands on the same
/// record.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Save a template under a display name.
///
/// Overwriting keeps the original `createdAt` and advances `updatedAt`;
/// the returned record is exactly what the store now holds.
pub async fn persist(
    store: &dyn TemplateStore,
    name: &str,
    template: &Template,
) -> Result<SavedTemplateRecord, SchabloneError> {
    let id = slugify(name);
    let now = Utc::now();
    let created_at = match store.get(&id).await? {
        Some(prior) => prior.created_at,
        None => now,
    };
    let record = SavedTemplateRecord {
        id,
        name: name.to_string(),
        template: template.clone(),
        created_at,
        updated_at: now,
    };
    store.save(record.clone()).await?;
    Ok(record)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Template"), "my-template");
        assert_eq!(slugify("Schwarz Beige Modern"), "schwarz-beige-modern");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("Zwei  Leerzeichen"), "zwei--leerzeichen");
    }

    #[tokio::test]
    async fn test_persist_then_list() {
        let store = MemoryStore::new();
        let template = catalog::by_name("Executive Cover").unwrap();

        let record = persist(&store, "My Template", &template).await.unwrap();
        assert_eq!(record.id, "my-template");
        assert_eq!(record.name, "My Template");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], record);
    }

    #[tokio::test]
    async fn test_persist_overwrites_by_name() {
        let store = MemoryStore::new();
        let template = catalog::by_name("Executive Cover").unwrap();

        let first = persist(&store, "My Template", &template).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let mut edited = template.clone();
        edited.pages[0].pop();
        let second = persist(&store, "My Template", &edited).await.unwrap();

        // Same id, one record, fresh updatedAt, original createdAt
        assert_eq!(second.id, first.id);
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(
            store.get("my-template").await.unwrap().unwrap().template,
            edited
        );
    }

    #[tokio::test]
    async fn test_record_wire_format() {
        let store = MemoryStore::new();
        let template = catalog::by_name("Executive Cover").unwrap();
        let record = persist(&store, "My Template", &template).await.unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "my-template");
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
    }
}
