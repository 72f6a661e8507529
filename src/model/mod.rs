//! Types that represent the core data model, such as `Document` and
//! `LineItem`.
mod document;
mod item;
mod money;
mod template;

pub use document::Document;
pub use item::{ItemField, LineItem};
pub use money::Rupiah;
