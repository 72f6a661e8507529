//! The `rab show` and `rab print` commands.

use crate::commands::open_session;
use crate::config::Config;
use crate::error::Result;
use crate::render;

/// Renders the document as a grouped table on stdout.
pub async fn show(config: Config) -> Result<()> {
    let session = open_session(&config).await?;
    println!("{}", session.document().title());
    println!(
        "{}",
        render::document_table(session.document(), config.messages(), config.theme())
    );
    Ok(())
}

/// Renders the printer-friendly view on stdout.
pub async fn print_view(config: Config) -> Result<()> {
    let session = open_session(&config).await?;
    println!(
        "{}",
        render::printable(session.document(), config.messages())
    );
    Ok(())
}
