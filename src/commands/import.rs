//! The `rab import` command.

use crate::commands::{open_session, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;
use crate::utils;
use anyhow::Context;
use std::path::Path;

/// Replaces the document with the contents of a JSON file. The previous
/// document stays reachable through undo in the same session, and on any
/// failure nothing changes.
pub async fn import(config: Config, file: &Path) -> Result<Out<HistoryStatus>> {
    let messages = config.messages();
    let mut session = open_session(&config).await?;
    let raw = utils::read(file).await.context(messages.import_failed)?;
    let status = session.import(&raw).await.context(messages.import_failed)?;
    Ok(Out::new(messages.import_done, status))
}
