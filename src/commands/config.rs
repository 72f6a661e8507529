//! The `rab config` command.

use crate::commands::Out;
use crate::config::{Config, Prefs, Theme};
use crate::error::Result;
use crate::lang::{self, Language};

/// Shows the current preferences, or changes and saves them when any of the
/// options were given.
pub async fn config(
    mut config: Config,
    language: Option<Language>,
    theme: Option<Theme>,
    detect_language: bool,
) -> Result<Out<Prefs>> {
    let mut prefs = config.prefs().clone();
    let mut changed = false;
    if detect_language {
        prefs.set_language(lang::detect_language().await);
        changed = true;
    }
    if let Some(language) = language {
        prefs.set_language(language);
        changed = true;
    }
    if let Some(theme) = theme {
        prefs.set_theme(theme);
        changed = true;
    }
    if changed {
        config.save_prefs(prefs.clone()).await?;
    }
    Ok(Out::new(
        format!("language: {}, theme: {}", prefs.language(), prefs.theme()),
        prefs,
    ))
}
