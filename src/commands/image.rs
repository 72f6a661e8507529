//! The `rab image` command.

use crate::commands::{open_session, row_index, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;
use crate::image::encode_data_uri;
use anyhow::bail;
use std::path::Path;

/// Attaches an image file to a row as an embedded `data:` URI, or clears the
/// row's image when `clear` is set.
pub async fn image(
    config: Config,
    row: usize,
    file: Option<&Path>,
    clear: bool,
) -> Result<Out<HistoryStatus>> {
    let messages = config.messages();
    let mut session = open_session(&config).await?;
    let index = row_index(row)?;
    if clear {
        let status = session.clear_image(index).await?;
        return Ok(Out::new(messages.image_cleared, status));
    }
    let file = match file {
        Some(file) => file,
        None => bail!("Provide an image file to attach, or --clear to remove one"),
    };
    let data_uri = encode_data_uri(file).await?;
    let status = session.set_image(index, data_uri).await?;
    Ok(Out::new(messages.image_set, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_attach_and_clear_an_image() {
        let env = TestEnv::new().await;
        let file = env.config().root().join("chip.png");
        std::fs::write(&file, [137u8, 80, 78, 71]).unwrap();

        image(env.config(), 1, Some(&file), false).await.unwrap();
        let saved = env.saved_document().await;
        assert!(saved.items()[0]
            .image()
            .starts_with("data:image/png;base64,"));

        image(env.config(), 1, None, true).await.unwrap();
        assert!(!env.saved_document().await.items()[0].has_image());
    }

    #[tokio::test]
    async fn test_image_requires_a_file_or_clear() {
        let env = TestEnv::new().await;
        assert!(image(env.config(), 1, None, false).await.is_err());
    }

    #[tokio::test]
    async fn test_image_missing_file_is_an_error() {
        let env = TestEnv::new().await;
        let file = env.config().root().join("absent.png");
        assert!(image(env.config(), 1, Some(&file), false).await.is_err());
    }
}
