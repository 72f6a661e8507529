//! The `rab set` and `rab title` commands.

use crate::commands::{open_session, row_index, Out};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStatus;
use crate::model::ItemField;

/// Changes one cell of a component row and commits.
pub async fn set_field(
    config: Config,
    row: usize,
    field: ItemField,
    value: &str,
) -> Result<Out<HistoryStatus>> {
    let mut session = open_session(&config).await?;
    let status = session.update_field(row_index(row)?, field, value).await?;
    Ok(Out::new(config.messages().field_updated, status))
}

/// Changes the project title and commits.
pub async fn set_title(config: Config, title: &str) -> Result<Out<HistoryStatus>> {
    let mut session = open_session(&config).await?;
    let status = session.set_title(title).await;
    Ok(Out::new(config.messages().title_updated, status))
}
