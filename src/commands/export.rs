//! The `rab export` command.

use crate::commands::{open_session, Out};
use crate::config::Config;
use crate::error::Result;
use crate::utils;
use std::path::{Path, PathBuf};

/// Writes the document to a JSON file. Without an explicit path the file is
/// named after the project title and lands in the current directory.
pub async fn export(config: Config, file: Option<&Path>) -> Result<Out<PathBuf>> {
    let messages = config.messages();
    let session = open_session(&config).await?;
    let path = match file {
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(session.document().export_file_name()),
    };
    utils::write(&path, session.export_json()?).await?;
    Ok(Out::new(
        format!("{} ({})", messages.export_done, path.display()),
        path,
    ))
}
