//! Turning image files into the `data:` URIs stored on a component row.

use crate::error::Result;
use anyhow::Context;
use base64::Engine;
use std::path::Path;

/// Reads `path` and encodes it as a `data:` URI so the image travels inside
/// the document JSON instead of as a file next to it.
pub(crate) async fn encode_data_uri(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Unable to read the image at '{}'", path.display()))?;
    let mime = mime_for_extension(path);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

fn mime_for_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
