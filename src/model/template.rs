//! The starter component list for a new document.

use crate::model::item::LineItem;
use crate::model::money::Rupiah;

/// The example rows a fresh document starts with, a small line-follower
/// robot build split over three modules.
pub(crate) fn initial_items() -> Vec<LineItem> {
    vec![
        LineItem::new(
            "A",
            "ELEKTRONIK",
            "Mikrokontroler (e.g., Arduino Uno)",
            1,
            "unit",
            Rupiah::new(150_000),
            "Otak utama proyek",
        ),
        LineItem::new(
            "A",
            "ELEKTRONIK",
            "Sensor Jarak (e.g., HC-SR04)",
            2,
            "unit",
            Rupiah::new(25_000),
            "Untuk deteksi halangan",
        ),
        LineItem::new(
            "B",
            "MEKANIK",
            "Roda Karet",
            4,
            "pcs",
            Rupiah::new(15_000),
            "Ukuran 65mm",
        ),
        LineItem::new(
            "B",
            "MEKANIK",
            "Motor DC + Gearbox",
            4,
            "unit",
            Rupiah::new(45_000),
            "Penggerak roda",
        ),
        LineItem::new(
            "C",
            "DAYA",
            "Baterai Li-Ion 18650",
            2,
            "unit",
            Rupiah::new(50_000),
            "Kapasitas 3000mAh",
        ),
        LineItem::new(
            "C",
            "DAYA",
            "Modul Charger TP4056",
            1,
            "unit",
            Rupiah::new(10_000),
            "Untuk mengisi daya baterai",
        ),
    ]
}
