//! The two languages the tool speaks, and every user-facing string in both.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const GEOLOCATION_URL: &str = "https://ipapi.co/json/";
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// The display language. Indonesian is the default because that is the
/// audience the tool was written for.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Id,
    En,
}

serde_plain::derive_display_from_serialize!(Language);
serde_plain::derive_fromstr_from_deserialize!(Language);

impl Language {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::Id => &ID_MESSAGES,
            Language::En => &EN_MESSAGES,
        }
    }
}

/// Guesses the language from the machine's country. Indonesia means
/// Indonesian, anywhere else means English, and a failed lookup falls back
/// to Indonesian.
pub async fn detect_language() -> Language {
    match lookup_country().await {
        Ok(country) if country == "ID" => Language::Id,
        Ok(_) => Language::En,
        Err(e) => {
            warn!("Unable to detect the country, keeping Indonesian: {e}");
            Language::Id
        }
    }
}

async fn lookup_country() -> Result<String> {
    #[derive(Deserialize)]
    struct GeoResponse {
        country: String,
    }
    let client = reqwest::Client::builder()
        .timeout(GEOLOCATION_TIMEOUT)
        .build()
        .context("Unable to build the HTTP client")?;
    let response: GeoResponse = client
        .get(GEOLOCATION_URL)
        .send()
        .await
        .context("Unable to reach the geolocation service")?
        .json()
        .await
        .context("Unable to parse the geolocation response")?;
    Ok(response.country)
}

/// All user-facing strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub project_title: &'static str,
    pub confirm_new_document: &'static str,
    confirm_delete_prefix: &'static str,
    row_deleted_prefix: &'static str,
    row_added_to_module_prefix: &'static str,
    pub row_added: &'static str,
    pub export_done: &'static str,
    pub import_done: &'static str,
    pub import_failed: &'static str,
    pub nothing_to_undo: &'static str,
    pub nothing_to_redo: &'static str,
    pub undo_done: &'static str,
    pub redo_done: &'static str,
    pub document_reset: &'static str,
    pub cancelled: &'static str,
    pub title_updated: &'static str,
    pub field_updated: &'static str,
    pub image_set: &'static str,
    pub image_cleared: &'static str,
    pub total_label: &'static str,
    pub col_no: &'static str,
    pub col_module: &'static str,
    pub col_category: &'static str,
    pub col_component: &'static str,
    pub col_quantity: &'static str,
    pub col_unit: &'static str,
    pub col_unit_price: &'static str,
    pub col_subtotal: &'static str,
    pub col_note: &'static str,
    pub col_image: &'static str,
    pub editor_hint: &'static str,
    pub unknown_command: &'static str,
    pub editor_help: &'static str,
}

impl Messages {
    pub fn confirm_delete(&self, name: &str) -> String {
        format!("{}{}?", self.confirm_delete_prefix, name)
    }

    pub fn row_deleted(&self, name: &str) -> String {
        format!("{}{}.", self.row_deleted_prefix, name)
    }

    pub fn row_added_to_module(&self, module: &str) -> String {
        format!("{}{}.", self.row_added_to_module_prefix, module)
    }
}

const ID_MESSAGES: Messages = Messages {
    project_title: "Judul Proyek Anda",
    confirm_new_document: "Apakah Anda yakin ingin memulai dokumen baru? \
        Semua data yang belum diekspor akan hilang.",
    confirm_delete_prefix: "Yakin ingin menghapus komponen: ",
    row_deleted_prefix: "Komponen dihapus: ",
    row_added_to_module_prefix: "Komponen baru ditambahkan ke modul ",
    row_added: "Komponen baru ditambahkan.",
    export_done: "Data RAB berhasil diexport sebagai JSON.",
    import_done: "Data RAB berhasil diimport.",
    import_failed: "Gagal mengimport data. Pastikan file JSON valid.",
    nothing_to_undo: "Tidak ada yang bisa di-undo.",
    nothing_to_redo: "Tidak ada yang bisa di-redo.",
    undo_done: "Undo berhasil.",
    redo_done: "Redo berhasil.",
    document_reset: "Dokumen baru dimulai.",
    cancelled: "Dibatalkan.",
    title_updated: "Judul proyek diperbarui.",
    field_updated: "Komponen diperbarui.",
    image_set: "Gambar ditambahkan.",
    image_cleared: "Gambar dihapus.",
    total_label: "TOTAL KESELURUHAN (ESTIMASI)",
    col_no: "No.",
    col_module: "Modul",
    col_category: "Kategori",
    col_component: "Komponen",
    col_quantity: "Jumlah",
    col_unit: "Satuan",
    col_unit_price: "Harga Satuan (Rp)",
    col_subtotal: "Subtotal (Rp)",
    col_note: "Keterangan",
    col_image: "Gambar",
    editor_hint: "Ketik 'help' untuk daftar perintah.",
    unknown_command: "Perintah tidak dikenal. Ketik 'help'.",
    editor_help: "Perintah:\n\
        \x20 show                   tampilkan tabel\n\
        \x20 add [MODUL]            tambah komponen, opsional ke modul tertentu\n\
        \x20 del BARIS              hapus komponen\n\
        \x20 set BARIS KOLOM NILAI  ubah satu sel\n\
        \x20 title JUDUL            ganti judul proyek\n\
        \x20 img BARIS [FILE]       pasang gambar, tanpa FILE berarti hapus\n\
        \x20 u | undo               undo\n\
        \x20 r | redo               redo\n\
        \x20 import FILE            impor dokumen JSON\n\
        \x20 export [FILE]          ekspor dokumen JSON\n\
        \x20 print                  tampilan teks polos\n\
        \x20 new                    mulai dokumen baru\n\
        \x20 help                   bantuan ini\n\
        \x20 q | quit               keluar",
};

const EN_MESSAGES: Messages = Messages {
    project_title: "Your Project Title",
    confirm_new_document: "Are you sure you want to start a new document? \
        All unexported data will be lost.",
    confirm_delete_prefix: "Are you sure you want to delete component: ",
    row_deleted_prefix: "Deleted component: ",
    row_added_to_module_prefix: "A new component was added to module ",
    row_added: "A new component was added.",
    export_done: "The RAB data was exported as JSON.",
    import_done: "The RAB data was imported.",
    import_failed: "Unable to import the data. Make sure the JSON file is valid.",
    nothing_to_undo: "Nothing to undo.",
    nothing_to_redo: "Nothing to redo.",
    undo_done: "Undone.",
    redo_done: "Redone.",
    document_reset: "A new document was started.",
    cancelled: "Cancelled.",
    title_updated: "The project title was updated.",
    field_updated: "The component was updated.",
    image_set: "The image was attached.",
    image_cleared: "The image was removed.",
    total_label: "GRAND TOTAL (ESTIMATE)",
    col_no: "No.",
    col_module: "Module",
    col_category: "Category",
    col_component: "Component",
    col_quantity: "Qty",
    col_unit: "Unit",
    col_unit_price: "Unit Price (Rp)",
    col_subtotal: "Subtotal (Rp)",
    col_note: "Notes",
    col_image: "Image",
    editor_hint: "Type 'help' for the list of commands.",
    unknown_command: "Unknown command. Type 'help'.",
    editor_help: "Commands:\n\
        \x20 show                   display the table\n\
        \x20 add [MODULE]           add a component, optionally to a module\n\
        \x20 del ROW                delete a component\n\
        \x20 set ROW COLUMN VALUE   change one cell\n\
        \x20 title TITLE            change the project title\n\
        \x20 img ROW [FILE]         attach an image, without FILE clears it\n\
        \x20 u | undo               undo\n\
        \x20 r | redo               redo\n\
        \x20 import FILE            import a JSON document\n\
        \x20 export [FILE]          export the JSON document\n\
        \x20 print                  plain text view\n\
        \x20 new                    start a new document\n\
        \x20 help                   this help\n\
        \x20 q | quit               quit",
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_language() {
        assert_eq!(Language::default(), Language::Id);
    }

    #[test]
    fn test_messages_lookup() {
        assert_eq!(Language::Id.messages().project_title, "Judul Proyek Anda");
        assert_eq!(Language::En.messages().project_title, "Your Project Title");
    }

    #[test]
    fn test_confirm_delete_names_the_component() {
        assert_eq!(
            Language::Id.messages().confirm_delete("Roda Karet"),
            "Yakin ingin menghapus komponen: Roda Karet?"
        );
    }

    #[test]
    fn test_language_string_forms() {
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert_eq!(Language::Id.to_string(), "id");
    }
}
