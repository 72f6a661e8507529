//! Persistence for the working document.

use crate::error::Result;
use crate::model::Document;
use crate::utils;
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A slot holding at most one saved document.
///
/// `load` is deliberately forgiving: a missing or unreadable slot is `None`,
/// and a corrupt slot is discarded and reported as `None` so the caller can
/// start over from the template. Only `save` surfaces errors, and the
/// history layer downgrades those to warnings.
#[async_trait]
pub trait DocumentStore {
    async fn save(&mut self, document: &Document) -> Result<()>;

    async fn load(&mut self) -> Result<Option<Document>>;

    async fn clear(&mut self) -> Result<()>;
}

/// Stores the document as a JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn save(&mut self, document: &Document) -> Result<()> {
        utils::write(&self.path, document.to_json()?).await
    }

    async fn load(&mut self) -> Result<Option<Document>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!("Unable to read '{}': {e}", self.path.display());
                return Ok(None);
            }
        };
        match Document::from_json(&raw) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                warn!(
                    "The saved document at '{}' is corrupt and will be removed: {e}",
                    self.path.display()
                );
                if let Err(e) = self.clear().await {
                    warn!("Unable to remove the corrupt document: {e}");
                }
                Ok(None)
            }
        }
    }

    async fn clear(&mut self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Unable to remove '{}'", self.path.display())),
        }
    }
}

/// Keeps the serialized document in memory. Used by tests and by anything
/// that wants a session without touching the disk.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
    broken: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw JSON, as if a document had been saved.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
            broken: false,
        }
    }

    /// A store whose writes always fail.
    pub fn broken() -> Self {
        Self {
            slot: None,
            broken: true,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save(&mut self, document: &Document) -> Result<()> {
        if self.broken {
            bail!("This store does not accept writes");
        }
        self.slot = Some(document.to_json()?);
        Ok(())
    }

    async fn load(&mut self) -> Result<Option<Document>> {
        let parsed = match &self.slot {
            Some(raw) => Document::from_json(raw),
            None => return Ok(None),
        };
        match parsed {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                warn!("The saved document is corrupt and will be discarded: {e}");
                self.slot = None;
                Ok(None)
            }
        }
    }

    async fn clear(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("document.json");
        let mut store = FileStore::new(&path);
        store.save(&Document::template("Proyek")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.title(), "Proyek");
        assert_eq!(loaded.len(), 6);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("document.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_removes_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("document.json");
        std::fs::write(&path, "definitely not json").unwrap();
        let mut store = FileStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_file_store_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("document.json");
        let mut store = FileStore::new(&path);
        store.save(&Document::new("x")).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());
        store.save(&Document::new("x")).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().title(), "x");
        store.clear().await.unwrap();
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_discards_corrupt_slot() {
        let mut store = MemoryStore::with_raw("nope");
        assert!(store.load().await.unwrap().is_none());
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_broken_memory_store() {
        let mut store = MemoryStore::broken();
        assert!(store.save(&Document::new("x")).await.is_err());
        store.clear().await.unwrap();
    }
}
