//! Terminal rendering of the RAB table.

use crate::config::Theme;
use crate::lang::Messages;
use crate::model::{Document, LineItem};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

const COLUMN_COUNT: usize = 10;
const IMAGE_MARK: &str = "✓";

/// The full table view: rows grouped by module with a heading row per
/// module, and a grand total row at the bottom. Row numbers are the stored
/// positions, so they stay valid as arguments to `del` and `set` even
/// though the display is sorted.
pub(crate) fn document_table(document: &Document, messages: &Messages, theme: Theme) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    set_rows(&mut table, document, messages, Some(theme));
    table
}

/// A printer-friendly rendition: the title, then the same rows with no
/// coloring in a markdown-style grid.
pub(crate) fn printable(document: &Document, messages: &Messages) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Dynamic);
    set_rows(&mut table, document, messages, None);
    format!("{}\n\n{table}", document.title())
}

fn set_rows(table: &mut Table, document: &Document, messages: &Messages, styling: Option<Theme>) {
    table.set_header(vec![
        styled(messages.col_no, Color::Cyan, styling),
        styled(messages.col_module, Color::Cyan, styling),
        styled(messages.col_category, Color::Cyan, styling),
        styled(messages.col_component, Color::Cyan, styling),
        styled(messages.col_quantity, Color::Cyan, styling),
        styled(messages.col_unit, Color::Cyan, styling),
        styled(messages.col_unit_price, Color::Cyan, styling),
        styled(messages.col_subtotal, Color::Cyan, styling),
        styled(messages.col_note, Color::Cyan, styling),
        styled(messages.col_image, Color::Cyan, styling),
    ]);

    let mut current_module: Option<&str> = None;
    for (stored_index, item) in sorted_rows(document) {
        if current_module != Some(item.module()) {
            current_module = Some(item.module());
            table.add_row(module_header_row(item, styling));
        }
        table.add_row(vec![
            Cell::new(stored_index + 1),
            Cell::new(item.module()),
            Cell::new(item.category()),
            Cell::new(item.name()),
            Cell::new(item.quantity()),
            Cell::new(item.unit()),
            Cell::new(item.unit_price()),
            Cell::new(item.subtotal()),
            Cell::new(item.note()),
            Cell::new(if item.has_image() { IMAGE_MARK } else { "" }),
        ]);
    }

    let mut total_row = vec![Cell::new(""), Cell::new(""), Cell::new("")];
    total_row.push(styled(messages.total_label, Color::Green, styling));
    total_row.extend([Cell::new(""), Cell::new(""), Cell::new("")]);
    total_row.push(styled(
        format!("Rp {}", document.grand_total()),
        Color::Green,
        styling,
    ));
    total_row.extend([Cell::new(""), Cell::new("")]);
    table.add_row(total_row);

    // Jumlah, Harga and Subtotal read as amounts.
    for index in [4, 6, 7] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Stored indices paired with their items, ordered for display. The sort is
/// stable on the module letter alone.
fn sorted_rows(document: &Document) -> Vec<(usize, &LineItem)> {
    let mut rows: Vec<(usize, &LineItem)> = document.items().iter().enumerate().collect();
    rows.sort_by(|a, b| a.1.module().cmp(b.1.module()));
    rows
}

fn module_header_row(item: &LineItem, styling: Option<Theme>) -> Vec<Cell> {
    let label = format!("{} - {}", item.module(), item.category());
    let mut row = vec![Cell::new(""), styled(label, Color::Yellow, styling)];
    row.resize_with(COLUMN_COUNT, || Cell::new(""));
    row
}

fn styled(text: impl ToString, color: Color, styling: Option<Theme>) -> Cell {
    let cell = Cell::new(text);
    match styling {
        Some(Theme::Dark) => cell.fg(color).add_attribute(Attribute::Bold),
        Some(Theme::Light) => cell.add_attribute(Attribute::Bold),
        None => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    fn document() -> Document {
        Document::template("Proyek Robot")
    }

    #[test]
    fn test_printable_contains_title_rows_and_total() {
        let text = printable(&document(), Language::Id.messages());
        assert!(text.starts_with("Proyek Robot\n"));
        assert!(text.contains("A - ELEKTRONIK"));
        assert!(text.contains("B - MEKANIK"));
        assert!(text.contains("C - DAYA"));
        assert!(text.contains("Roda Karet"));
        assert!(text.contains("TOTAL KESELURUHAN (ESTIMASI)"));
        assert!(text.contains("Rp 550.000"));
    }

    #[test]
    fn test_row_numbers_follow_stored_order() {
        let mut document = Document::new("t");
        document.add_item(LineItem::new(
            "B",
            "MEKANIK",
            "Roda",
            1,
            "pcs",
            crate::model::Rupiah::new(100),
            "",
        ));
        document.add_item(LineItem::new(
            "A",
            "ELEKTRONIK",
            "Sensor",
            1,
            "pcs",
            crate::model::Rupiah::new(100),
            "",
        ));
        let text = printable(&document, Language::En.messages());
        // The A row sorts first but keeps its stored number, 2.
        let sensor_line = text.lines().find(|l| l.contains("Sensor")).unwrap();
        assert!(sensor_line.contains('2'));
        let roda_line = text.lines().find(|l| l.contains("Roda")).unwrap();
        assert!(roda_line.contains('1'));
    }

    #[test]
    fn test_image_mark() {
        let mut document = document();
        document.set_image(2, "data:image/png;base64,AQID").unwrap();
        let text = printable(&document, Language::Id.messages());
        let line = text.lines().find(|l| l.contains("Roda Karet")).unwrap();
        assert!(line.contains(IMAGE_MARK));
    }

    #[test]
    fn test_grouped_table_renders() {
        let table = document_table(&document(), Language::Id.messages(), Theme::Dark);
        let text = table.to_string();
        assert!(text.contains("Mikrokontroler"));
        assert!(text.contains("550.000"));
    }
}
