//! The `rab add` command.

use crate::commands::{open_session, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;

/// Adds a placeholder component row, at the end of the document or after the
/// last row of `module`.
pub async fn add(config: Config, module: Option<&str>) -> Result<Out<HistoryStatus>> {
    let messages = config.messages();
    let mut session = open_session(&config).await?;
    let out = match module {
        Some(module) => {
            let status = session.add_row_to_module(module).await;
            Out::new(messages.row_added_to_module(module), status)
        }
        None => {
            let status = session.add_row().await;
            Out::new(messages.row_added, status)
        }
    };
    Ok(out)
}
