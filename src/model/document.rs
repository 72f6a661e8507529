//! The RAB document: a titled list of component rows.

use crate::error::Result;
use crate::model::item::{ItemField, LineItem};
use crate::model::money::Rupiah;
use crate::model::template;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// A project budget plan. This is the unit that history tracks and the store
/// persists, and its serialized form is also the import/export file format.
///
/// Items are kept in insertion order. Grouping by module happens only when a
/// sorted view is requested for display, so the stored order is authoritative.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    title: String,

    #[serde(rename = "data", default)]
    items: Vec<LineItem>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// A starter document holding the example component list.
    pub fn template(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: template::initial_items(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Result<&LineItem> {
        match self.items.get(index) {
            Some(item) => Ok(item),
            None => bail!(
                "There is no row {} in a document with {} rows",
                index,
                self.items.len()
            ),
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(item) => Ok(item),
            None => bail!("There is no row {} in a document with {} rows", index, len),
        }
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Inserts `item` directly after the last stored row that belongs to the
    /// same module. When the module has no rows yet the item goes to the end.
    pub fn insert_in_module(&mut self, item: LineItem) {
        match self
            .items
            .iter()
            .rposition(|existing| existing.module() == item.module())
        {
            Some(position) => self.items.insert(position + 1, item),
            None => self.items.push(item),
        }
    }

    pub fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            bail!(
                "There is no row {} in a document with {} rows",
                index,
                self.items.len()
            );
        }
        Ok(self.items.remove(index))
    }

    pub fn set_field(&mut self, index: usize, field: ItemField, raw: &str) -> Result<()> {
        self.item_mut(index)?.set_field(field, raw);
        Ok(())
    }

    pub fn set_image(&mut self, index: usize, data_uri: impl Into<String>) -> Result<()> {
        self.item_mut(index)?.set_image(data_uri);
        Ok(())
    }

    pub fn clear_image(&mut self, index: usize) -> Result<()> {
        self.item_mut(index)?.clear_image();
        Ok(())
    }

    /// The sum of all row subtotals, saturating at `u64::MAX`.
    pub fn grand_total(&self) -> Rupiah {
        self.items
            .iter()
            .fold(Rupiah::new(0), |total, item| total.saturating_add(item.subtotal()))
    }

    /// A copy of this document with rows grouped by module. The sort is
    /// stable and compares the module letter only, so rows inside a module
    /// keep their stored order.
    pub fn sorted_by_module(&self) -> Document {
        let mut sorted = self.clone();
        sorted.items.sort_by(|a, b| a.module().cmp(b.module()));
        sorted
    }

    /// Parses a document from its JSON form. Rows marked as headers are an
    /// artifact of exported table snapshots and are dropped.
    pub fn from_json(raw: &str) -> Result<Document> {
        let mut document: Document =
            serde_json::from_str(raw).context("Unable to parse the document JSON")?;
        document.items.retain(|item| !item.is_header());
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Unable to serialize the document")
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Unable to serialize the document")
    }

    /// The default export file name, derived from the title by replacing
    /// every whitespace character with an underscore.
    pub fn export_file_name(&self) -> String {
        let mut name: String = self
            .title
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        name.push_str("_RAB.json");
        name
    }
}
