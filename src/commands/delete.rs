//! The `rab delete` command.

use crate::commands::{confirm, open_session, row_index, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;

/// Deletes a component row, naming it in a confirmation prompt first unless
/// `yes` was given.
pub async fn delete(config: Config, row: usize, yes: bool) -> Result<Out<HistoryStatus>> {
    let messages = config.messages();
    let mut session = open_session(&config).await?;
    let index = row_index(row)?;
    let name = session.document().item(index)?.name().to_string();
    if !yes && !confirm(&messages.confirm_delete(&name)).await? {
        return Ok(Out::new_message(messages.cancelled));
    }
    let (removed, status) = session.delete_row(index).await?;
    Ok(Out::new(messages.row_deleted(removed.name()), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_with_yes_skips_the_prompt() {
        let env = TestEnv::new().await;
        let out = delete(env.config(), 3, true).await.unwrap();
        assert!(out.message().contains("Roda Karet"));
        assert!(out.structure().unwrap().can_undo());
        let saved = env.saved_document().await;
        assert_eq!(saved.len(), 5);
    }

    #[tokio::test]
    async fn test_delete_row_zero_is_an_error() {
        let env = TestEnv::new().await;
        assert!(delete(env.config(), 0, true).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_an_error() {
        let env = TestEnv::new().await;
        assert!(delete(env.config(), 99, true).await.is_err());
        // Nothing was committed past the starting snapshot.
        assert_eq!(env.saved_document().await.len(), 6);
    }
}
