pub mod args;
pub mod commands;
mod config;
mod error;
mod history;
mod image;
mod lang;
mod model;
mod render;
mod session;
mod store;
mod utils;

pub use config::{Config, Prefs, Theme};
pub use error::Error;
pub use error::Result;
pub use history::{History, HistoryStatus};
pub use lang::{detect_language, Language, Messages};
pub use model::{Document, ItemField, LineItem, Rupiah};
pub use session::Session;
pub use store::{DocumentStore, FileStore, MemoryStore};
