//! The `rab new` command.

use crate::commands::{confirm, open_session, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;

/// Starts over: clears the saved document and seeds a fresh template.
pub async fn new(config: Config, yes: bool) -> Result<Out<HistoryStatus>> {
    let messages = config.messages();
    if !yes && !confirm(messages.confirm_new_document).await? {
        return Ok(Out::new_message(messages.cancelled));
    }
    let mut session = open_session(&config).await?;
    let status = session.reset().await;
    Ok(Out::new(messages.document_reset, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_new_discards_the_saved_document() {
        let env = TestEnv::new().await;
        crate::commands::set_title(env.config(), "Lama").await.unwrap();
        assert_eq!(env.saved_document().await.title(), "Lama");

        let out = new(env.config(), true).await.unwrap();
        assert_eq!(out.message(), "Dokumen baru dimulai.");
        assert!(!out.structure().unwrap().can_undo());
        assert_eq!(env.saved_document().await.title(), "Judul Proyek Anda");
    }
}
