//! Undo/redo history held as full document snapshots.

use crate::model::Document;
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::warn;

/// A linear edit history with a cursor pointing at the current snapshot.
///
/// Committing while the cursor sits before the last entry discards the redo
/// tail, the same way an editor does. Undo and redo only move the cursor.
/// The persistent store is written on commit and cleared on reset, never
/// from undo or redo, so the saved document always reflects the most recent
/// commit even when the user has stepped backwards.
#[derive(Default, Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    /// `None` only while no snapshot has been committed.
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `document` as the new current snapshot. The store is written
    /// first. A store failure is logged and does not block the commit, so an
    /// unwritable disk degrades to an in-memory session instead of an error.
    pub async fn commit(
        &mut self,
        document: &Document,
        store: &mut (dyn DocumentStore + Send),
    ) -> HistoryStatus {
        if let Err(e) = store.save(document).await {
            warn!("Unable to save the document: {e}");
        }
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(document.clone());
        self.cursor = Some(self.entries.len() - 1);
        self.status()
    }

    /// Steps the cursor back and returns the snapshot it now points at, or
    /// `None` when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1)
    }

    /// Steps the cursor forward and returns the snapshot it now points at,
    /// or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1)
    }

    /// Clears the store and all entries, then commits `seed` as the single
    /// starting snapshot.
    pub async fn reset(
        &mut self,
        seed: &Document,
        store: &mut (dyn DocumentStore + Send),
    ) -> HistoryStatus {
        if let Err(e) = store.clear().await {
            warn!("Unable to clear the saved document: {e}");
        }
        self.entries.clear();
        self.cursor = None;
        self.commit(seed, store).await
    }

    pub fn status(&self) -> HistoryStatus {
        match self.cursor {
            Some(cursor) => HistoryStatus {
                can_undo: cursor > 0,
                can_redo: cursor + 1 < self.entries.len(),
            },
            None => HistoryStatus {
                can_undo: false,
                can_redo: false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether the history can currently move in either direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct HistoryStatus {
    can_undo: bool,
    can_redo: bool,
}

impl HistoryStatus {
    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn doc(title: &str) -> Document {
        Document::new(title)
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.status().can_undo());
        assert!(!history.status().can_redo());
    }

    #[tokio::test]
    async fn test_commit_advances_cursor() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        let status = history.commit(&doc("one"), &mut store).await;
        assert!(!status.can_undo());
        assert!(!status.can_redo());
        let status = history.commit(&doc("two"), &mut store).await;
        assert!(status.can_undo());
        assert!(!status.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_undo_stops_at_first_entry() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        history.commit(&doc("one"), &mut store).await;
        history.commit(&doc("two"), &mut store).await;
        assert_eq!(history.undo().unwrap().title(), "one");
        assert!(history.undo().is_none());
        let status = history.status();
        assert!(!status.can_undo());
        assert!(status.can_redo());
    }

    #[tokio::test]
    async fn test_redo_after_undo() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        history.commit(&doc("one"), &mut store).await;
        history.commit(&doc("two"), &mut store).await;
        history.undo();
        assert_eq!(history.redo().unwrap().title(), "two");
        assert!(history.redo().is_none());
    }

    #[tokio::test]
    async fn test_commit_discards_redo_tail() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        history.commit(&doc("one"), &mut store).await;
        history.commit(&doc("two"), &mut store).await;
        history.commit(&doc("three"), &mut store).await;
        history.undo();
        history.undo();
        let status = history.commit(&doc("four"), &mut store).await;
        assert_eq!(history.len(), 2);
        assert!(!status.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.undo().unwrap().title(), "one");
    }

    #[tokio::test]
    async fn test_commit_writes_the_store() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        history.commit(&doc("saved"), &mut store).await;
        assert!(store.raw().unwrap().contains("saved"));
    }

    #[tokio::test]
    async fn test_commit_survives_store_failure() {
        let mut history = History::new();
        let mut store = MemoryStore::broken();
        let status = history.commit(&doc("one"), &mut store).await;
        history.commit(&doc("two"), &mut store).await;
        assert_eq!(history.len(), 2);
        assert!(!status.can_undo());
        assert!(history.undo().is_some());
    }

    #[tokio::test]
    async fn test_reset_reseeds_history_and_store() {
        let mut history = History::new();
        let mut store = MemoryStore::new();
        history.commit(&doc("one"), &mut store).await;
        history.commit(&doc("two"), &mut store).await;
        let status = history.reset(&doc("fresh"), &mut store).await;
        assert_eq!(history.len(), 1);
        assert!(!status.can_undo());
        assert!(!status.can_redo());
        assert!(store.raw().unwrap().contains("fresh"));
    }
}
