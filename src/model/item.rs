//! A single component row of the RAB table.

use crate::model::money::{lenient_count, parse_loose_int, Rupiah};
use serde::{Deserialize, Serialize};

/// Category given to rows created with a plain "add row".
const NEW_ROW_MODULE: &str = "E";
const NEW_ROW_CATEGORY: &str = "KOMPONEN LAIN";
/// Category given to rows created under an existing module header.
const NEW_MODULE_ROW_CATEGORY: &str = "KATEGORI BARU";
const NEW_ROW_NAME: &str = "Komponen Baru";
const NEW_ROW_QUANTITY: u64 = 1;
const NEW_ROW_UNIT: &str = "pcs";
const NEW_ROW_PRICE: u64 = 10_000;
const NEW_ROW_NOTE: &str = "Masukkan keterangan di sini";

/// One line of the bill of materials.
///
/// Field names follow the document's JSON shape, which uses the Indonesian
/// column names of the RAB table. `is_header` exists only on the wire: header
/// rows are derived from the module grouping at render time and any stored
/// header row is dropped when a document is read.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "modul", default)]
    module: String,

    #[serde(rename = "kategori", default)]
    category: String,

    #[serde(rename = "komponen", default)]
    name: String,

    #[serde(rename = "jumlah", default, deserialize_with = "lenient_count")]
    quantity: u64,

    #[serde(rename = "satuan", default)]
    unit: String,

    #[serde(rename = "harga", default)]
    unit_price: Rupiah,

    #[serde(rename = "keterangan", default)]
    note: String,

    /// A `data:` URI, or the empty string when the row has no image.
    #[serde(default)]
    image: String,

    #[serde(rename = "isHeader", default)]
    is_header: bool,
}

impl LineItem {
    pub fn new(
        module: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        quantity: u64,
        unit: impl Into<String>,
        unit_price: Rupiah,
        note: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            category: category.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            note: note.into(),
            image: String::new(),
            is_header: false,
        }
    }

    /// The default row appended by "add row": a module `E` placeholder
    /// component the user is expected to edit.
    pub fn new_row() -> Self {
        Self::new(
            NEW_ROW_MODULE,
            NEW_ROW_CATEGORY,
            NEW_ROW_NAME,
            NEW_ROW_QUANTITY,
            NEW_ROW_UNIT,
            Rupiah::new(NEW_ROW_PRICE),
            NEW_ROW_NOTE,
        )
    }

    /// The default row inserted under an existing module's header.
    pub fn new_module_row(module: impl AsRef<str>) -> Self {
        Self::new(
            module.as_ref().trim(),
            NEW_MODULE_ROW_CATEGORY,
            NEW_ROW_NAME,
            NEW_ROW_QUANTITY,
            NEW_ROW_UNIT,
            Rupiah::new(NEW_ROW_PRICE),
            NEW_ROW_NOTE,
        )
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> Rupiah {
        self.unit_price
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    pub(crate) fn is_header(&self) -> bool {
        self.is_header
    }

    /// The derived cost of this row.
    pub fn subtotal(&self) -> Rupiah {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Writes one editable cell. Text fields are trimmed and numeric fields
    /// go through the loose integer parse, so a bad value lands as zero
    /// rather than an error.
    pub(crate) fn set_field(&mut self, field: ItemField, raw: &str) {
        match field {
            ItemField::Modul => self.module = raw.trim().to_string(),
            ItemField::Kategori => self.category = raw.trim().to_string(),
            ItemField::Komponen => self.name = raw.trim().to_string(),
            ItemField::Jumlah => self.quantity = parse_loose_int(raw),
            ItemField::Satuan => self.unit = raw.trim().to_string(),
            ItemField::Harga => self.unit_price = Rupiah::parse_loose(raw),
            ItemField::Keterangan => self.note = raw.trim().to_string(),
        }
    }

    pub(crate) fn set_image(&mut self, data_uri: impl Into<String>) {
        self.image = data_uri.into();
    }

    pub(crate) fn clear_image(&mut self) {
        self.image.clear();
    }
}

/// The editable cells of a component row, named after the table's columns.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Modul,
    Kategori,
    Komponen,
    Jumlah,
    Satuan,
    Harga,
    Keterangan,
}

serde_plain::derive_display_from_serialize!(ItemField);
serde_plain::derive_fromstr_from_deserialize!(ItemField);
