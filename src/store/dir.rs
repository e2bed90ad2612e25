//! Directory-backed template store.
//!
//! One pretty-printed JSON file per record, named `<id>.json` under the
//! store root. The format matches the export file format, so a stored
//! record's `template` value can be copied straight into an import.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::SchabloneError;
use crate::store::{SavedTemplateRecord, TemplateStore};

/// Filesystem store rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file for an id, rejecting anything that would escape
    /// the store root. Ids come from [`slugify`](crate::store::slugify)
    /// but the store cannot assume every caller went through it.
    fn record_path(&self, id: &str) -> Result<PathBuf, SchabloneError> {
        if id.is_empty()
            || id.contains('/')
            || id.contains('\\')
            || id.contains("..")
            || id.starts_with('.')
        {
            return Err(SchabloneError::Store(format!("invalid record id '{id}'")));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

#[async_trait]
impl TemplateStore for DirStore {
    async fn save(&self, record: SavedTemplateRecord) -> Result<(), SchabloneError> {
        let path = self.record_path(&record.id)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SchabloneError::Store(format!("cannot create store root: {e}")))?;
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| SchabloneError::Store(format!("record serialization failed: {e}")))?;

        // Write-then-rename: a failure mid-write leaves the prior record
        // intact instead of a truncated file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| SchabloneError::Store(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| SchabloneError::Store(format!("cannot commit {}: {e}", path.display())))
    }

    async fn get(&self, id: &str) -> Result<Option<SavedTemplateRecord>, SchabloneError> {
        let path = self.record_path(id)?;
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SchabloneError::Store(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        let record = serde_json::from_str(&json).map_err(|e| {
            SchabloneError::Store(format!("corrupt record {}: {e}", path.display()))
        })?;
        Ok(Some(record))
    }

    async fn list(&self) -> Result<Vec<SavedTemplateRecord>, SchabloneError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // A store that was never written to lists as empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SchabloneError::Store(format!(
                    "cannot list {}: {e}",
                    self.root.display()
                )));
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SchabloneError::Store(format!("cannot list store: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path).await {
                Ok(json) => match serde_json::from_str::<SavedTemplateRecord>(&json) {
                    Ok(record) => records.push(record),
                    // One bad file must not take the whole catalog down
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping corrupt record")
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable record")
                }
            }
        }
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, SchabloneError> {
        let path = self.record_path(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SchabloneError::Store(format!(
                "cannot delete {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persist;
    use crate::template::Template;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        let record = persist(&store, "My Template", &Template::a4())
            .await
            .unwrap();
        assert!(dir.path().join("my-template.json").exists());

        let loaded = store.get("my-template").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_list_skips_foreign_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        persist(&store, "Alpha", &Template::a4()).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a record").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_empty_store_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        persist(&store, "Alpha", &Template::a4()).await.unwrap();

        assert!(store.delete("alpha").await.unwrap());
        assert!(!dir.path().join("alpha.json").exists());
        assert!(!store.delete("alpha").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_commits_without_temp_residue() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        persist(&store, "Alpha", &Template::a4()).await.unwrap();
        persist(&store, "Alpha", &Template::a4()).await.unwrap();

        assert!(dir.path().join("alpha.json").exists());
        assert!(!dir.path().join("alpha.json.tmp").exists());
        // A stray temp file from an interrupted write is not a record
        std::fs::write(dir.path().join("beta.json.tmp"), "{").unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_escaping_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        assert!(store.get("../etc/passwd").await.is_err());
        assert!(store.get("a/b").await.is_err());
        assert!(store.delete("..").await.is_err());
    }
}
