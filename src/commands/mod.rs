//! Command handlers for the rab CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod config;
mod delete;
mod edit;
mod export;
mod image;
mod import;
mod new;
mod show;
mod update;

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use anyhow::{ensure, Context};
use serde::Serialize;
use std::fmt::Debug;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

pub use add::add;
pub use config::config;
pub use delete::delete;
pub use edit::edit;
pub use export::export;
pub use image::image;
pub use import::import;
pub use new::new;
pub use show::{print_view, show};
pub use update::{set_field, set_title};

/// The output type for a command. This allows the command to return a
/// consistent message and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the
    /// command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as
    /// JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Opens the editing session against the document in the rab home.
pub(crate) async fn open_session(config: &Config) -> Result<Session> {
    Session::open(Box::new(config.store()), config.messages().project_title).await
}

/// Converts a row number from the command line, which counts from 1 the way
/// the table's No. column does, to a stored index.
pub(crate) fn row_index(row: usize) -> Result<usize> {
    ensure!(row > 0, "Row numbers start at 1");
    Ok(row - 1)
}

/// Prints `prompt` to stderr and reads a y/N answer from stdin. EOF counts
/// as no.
pub(crate) async fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .await
        .context("Unable to read from stdin")?;
    if bytes == 0 {
        return Ok(false);
    }
    Ok(is_yes(&line))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "ya" | "yes"
    )
}
