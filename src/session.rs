//! The mutation surface that ties the document, its history and the store
//! together.

use crate::error::Result;
use crate::history::{History, HistoryStatus};
use crate::model::{Document, ItemField, LineItem};
use crate::store::DocumentStore;

/// An editing session over one document.
///
/// Every mutating method except [`Session::stage_field`] commits: the store
/// is written and a history snapshot is recorded in one step. `stage_field`
/// exists for the interactive editor, where a cell edit only becomes a
/// snapshot once the user leaves the cell, and the pending value is folded
/// into the next commit.
///
/// Opening a session always commits once, either the saved document or a
/// fresh template, so undo can never step back past the state the user first
/// saw.
pub struct Session {
    document: Document,
    history: History,
    store: Box<dyn DocumentStore + Send>,
    default_title: String,
}

impl Session {
    /// Loads the saved document from `store`, or seeds a template when the
    /// store is empty, and commits that starting state.
    pub async fn open(
        mut store: Box<dyn DocumentStore + Send>,
        default_title: impl Into<String>,
    ) -> Result<Self> {
        let default_title = default_title.into();
        let mut document = match store.load().await? {
            Some(saved) => saved,
            None => Document::template(&default_title),
        };
        if document.title().is_empty() {
            document.set_title(&default_title);
        }
        let mut history = History::new();
        history.commit(&document, store.as_mut()).await;
        Ok(Self {
            document,
            history,
            store,
            default_title,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Commits the current document, including any staged field edits.
    pub async fn commit(&mut self) -> HistoryStatus {
        self.history
            .commit(&self.document, self.store.as_mut())
            .await
    }

    /// Appends a default row and commits.
    pub async fn add_row(&mut self) -> HistoryStatus {
        self.document.add_item(LineItem::new_row());
        self.commit().await
    }

    /// Adds a default row after the last row of `module` and commits.
    pub async fn add_row_to_module(&mut self, module: &str) -> HistoryStatus {
        self.document
            .insert_in_module(LineItem::new_module_row(module));
        self.commit().await
    }

    /// Removes the row at `index` and commits, returning the removed row so
    /// the caller can name it.
    pub async fn delete_row(&mut self, index: usize) -> Result<(LineItem, HistoryStatus)> {
        let removed = self.document.remove_item(index)?;
        let status = self.commit().await;
        Ok((removed, status))
    }

    /// Writes one cell without committing. The change rides along with the
    /// next commit.
    pub fn stage_field(&mut self, index: usize, field: ItemField, value: &str) -> Result<()> {
        self.document.set_field(index, field, value)
    }

    /// Writes one cell and commits.
    pub async fn update_field(
        &mut self,
        index: usize,
        field: ItemField,
        value: &str,
    ) -> Result<HistoryStatus> {
        self.document.set_field(index, field, value)?;
        Ok(self.commit().await)
    }

    /// Sets the project title verbatim and commits.
    pub async fn set_title(&mut self, title: impl Into<String>) -> HistoryStatus {
        self.document.set_title(title);
        self.commit().await
    }

    pub async fn set_image(
        &mut self,
        index: usize,
        data_uri: impl Into<String>,
    ) -> Result<HistoryStatus> {
        self.document.set_image(index, data_uri)?;
        Ok(self.commit().await)
    }

    pub async fn clear_image(&mut self, index: usize) -> Result<HistoryStatus> {
        self.document.clear_image(index)?;
        Ok(self.commit().await)
    }

    /// Replaces the document with one parsed from `raw` and commits exactly
    /// once. On a parse error the session is left untouched.
    pub async fn import(&mut self, raw: &str) -> Result<HistoryStatus> {
        let mut imported = Document::from_json(raw)?;
        if imported.title().is_empty() {
            imported.set_title(&self.default_title);
        }
        self.document = imported;
        Ok(self.commit().await)
    }

    /// The document as pretty-printed JSON, suitable for an export file.
    pub fn export_json(&self) -> Result<String> {
        self.document.to_pretty_json()
    }

    /// Throws away the document, the history and the saved slot, then seeds
    /// and commits a fresh template.
    pub async fn reset(&mut self) -> HistoryStatus {
        self.document = Document::template(&self.default_title);
        self.history
            .reset(&self.document, self.store.as_mut())
            .await
    }

    /// Steps back one snapshot. Returns `false` when there is nothing to
    /// undo. The saved document is not touched.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                true
            }
            None => false,
        }
    }

    /// Steps forward one snapshot. Returns `false` when there is nothing to
    /// redo. The saved document is not touched.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rupiah;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    const DEFAULT_TITLE: &str = "Judul Proyek Anda";

    async fn session_with_raw(raw: &str) -> Session {
        Session::open(Box::new(MemoryStore::with_raw(raw)), DEFAULT_TITLE)
            .await
            .unwrap()
    }

    async fn empty_session() -> Session {
        Session::open(Box::new(MemoryStore::new()), DEFAULT_TITLE)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_empty_store_seeds_template() {
        let session = empty_session().await;
        assert_eq!(session.document().title(), DEFAULT_TITLE);
        assert_eq!(session.document().len(), 6);
        assert_eq!(session.history().len(), 1);
        assert!(!session.status().can_undo());
        assert!(!session.status().can_redo());
    }

    #[tokio::test]
    async fn test_open_uses_saved_document() {
        let session = session_with_raw(r#"{"title":"Tersimpan","data":[]}"#).await;
        assert_eq!(session.document().title(), "Tersimpan");
        assert!(session.document().is_empty());
    }

    #[tokio::test]
    async fn test_open_substitutes_empty_title() {
        let session = session_with_raw(r#"{"data":[{"modul":"A"}]}"#).await;
        assert_eq!(session.document().title(), DEFAULT_TITLE);
        assert_eq!(session.document().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_undo_redo_totals() {
        let raw = r#"{"title":"Proyek","data":[
            {"modul":"A","komponen":"x","jumlah":100,"harga":10},
            {"modul":"A","komponen":"y","jumlah":1,"harga":50}]}"#;
        let mut session = session_with_raw(raw).await;
        assert_eq!(session.document().grand_total(), Rupiah::new(1_050));

        let status = session
            .update_field(0, ItemField::Harga, "20")
            .await
            .unwrap();
        assert!(status.can_undo());
        assert_eq!(session.document().grand_total(), Rupiah::new(2_050));

        assert!(session.undo());
        assert_eq!(session.document().grand_total(), Rupiah::new(1_050));
        assert!(session.status().can_redo());

        assert!(session.redo());
        assert_eq!(session.document().grand_total(), Rupiah::new(2_050));
    }

    #[tokio::test]
    async fn test_undo_leaves_saved_document_at_last_commit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("document.json");
        let mut session = Session::open(Box::new(FileStore::new(&path)), DEFAULT_TITLE)
            .await
            .unwrap();
        session.set_title("Edited").await;
        let saved_before = std::fs::read_to_string(&path).unwrap();

        assert!(session.undo());
        assert_eq!(session.document().title(), DEFAULT_TITLE);
        let saved_after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved_before, saved_after);
        assert!(saved_after.contains("Edited"));
    }

    #[tokio::test]
    async fn test_add_row_appends_default() {
        let mut session = empty_session().await;
        let status = session.add_row().await;
        assert!(status.can_undo());
        assert_eq!(session.document().len(), 7);
        let last = session.document().items().last().unwrap();
        assert_eq!(last.name(), "Komponen Baru");
        assert_eq!(last.module(), "E");
    }

    #[tokio::test]
    async fn test_add_row_to_module_inserts_after_last_row() {
        let raw = r#"{"title":"t","data":[
            {"modul":"A","komponen":"a1"},
            {"modul":"B","komponen":"b1"},
            {"modul":"A","komponen":"a2"}]}"#;
        let mut session = session_with_raw(raw).await;
        session.add_row_to_module("A").await;
        let names: Vec<&str> = session
            .document()
            .items()
            .iter()
            .map(|item| item.name())
            .collect();
        assert_eq!(names, vec!["a1", "b1", "a2", "Komponen Baru"]);
        assert_eq!(session.document().items()[3].category(), "KATEGORI BARU");
    }

    #[tokio::test]
    async fn test_delete_row_returns_the_removed_item() {
        let mut session = empty_session().await;
        let (removed, status) = session.delete_row(2).await.unwrap();
        assert_eq!(removed.name(), "Roda Karet");
        assert!(status.can_undo());
        assert_eq!(session.document().len(), 5);
    }

    #[tokio::test]
    async fn test_delete_out_of_range_commits_nothing() {
        let mut session = empty_session().await;
        assert!(session.delete_row(99).await.is_err());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.document().len(), 6);
    }

    #[tokio::test]
    async fn test_stage_field_defers_the_commit() {
        let mut session = empty_session().await;
        session.stage_field(0, ItemField::Harga, "999").unwrap();
        assert_eq!(session.document().items()[0].unit_price(), Rupiah::new(999));
        assert_eq!(session.history().len(), 1);
        assert!(!session.status().can_undo());

        session.commit().await;
        assert_eq!(session.history().len(), 2);
        assert!(session.status().can_undo());
    }

    #[tokio::test]
    async fn test_import_commits_exactly_once() {
        let mut session = empty_session().await;
        let status = session
            .import(r#"{"title":"Impor","data":[{"modul":"A","komponen":"x"}]}"#)
            .await
            .unwrap();
        assert!(status.can_undo());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.document().title(), "Impor");
        assert_eq!(session.document().len(), 1);

        assert!(session.undo());
        assert_eq!(session.document().len(), 6);
    }

    #[tokio::test]
    async fn test_import_without_title_gets_the_default() {
        let mut session = empty_session().await;
        session.import(r#"{"data":[]}"#).await.unwrap();
        assert_eq!(session.document().title(), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_failed_import_preserves_the_session() {
        let mut session = empty_session().await;
        let before = session.document().clone();
        assert!(session.import("not json").await.is_err());
        assert_eq!(session.document(), &before);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_discards_history_and_reseeds() {
        let mut session = empty_session().await;
        session.set_title("Edited").await;
        session.add_row().await;
        let status = session.reset().await;
        assert!(!status.can_undo());
        assert!(!status.can_redo());
        assert_eq!(session.document().title(), DEFAULT_TITLE);
        assert_eq!(session.document().len(), 6);
        assert_eq!(session.history().len(), 1);
        assert!(!session.undo());
    }

    #[tokio::test]
    async fn test_undo_redo_at_the_bounds() {
        let mut session = empty_session().await;
        assert!(!session.undo());
        assert!(!session.redo());
    }

    #[tokio::test]
    async fn test_set_title_keeps_whitespace() {
        let mut session = empty_session().await;
        session.set_title("  spaced  ").await;
        assert_eq!(session.document().title(), "  spaced  ");
    }

    #[tokio::test]
    async fn test_set_and_clear_image() {
        let mut session = empty_session().await;
        session
            .set_image(0, "data:image/png;base64,AAAA")
            .await
            .unwrap();
        assert!(session.document().items()[0].has_image());
        session.clear_image(0).await.unwrap();
        assert!(!session.document().items()[0].has_image());
    }
}
