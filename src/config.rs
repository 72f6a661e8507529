//! Configuration handling for the rab home directory.
//!
//! Preferences are stored at `$RAB_HOME/prefs.json` and the working document
//! at `$RAB_HOME/document.json`. Both are created on demand, so a first run
//! needs no setup step.

use crate::lang::{Language, Messages};
use crate::store::FileStore;
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_NAME: &str = "rab";
const PREFS_VERSION: u8 = 1;
const PREFS_JSON: &str = "prefs.json";
const DOCUMENT_JSON: &str = "document.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$RAB_HOME` and from there it
/// loads `$RAB_HOME/prefs.json` and provides the paths of the other items
/// expected inside the rab home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    prefs_path: PathBuf,
    document_path: PathBuf,
    prefs: Prefs,
}

impl Config {
    /// Creates the rab home directory if needed and loads the preferences.
    /// Missing or unusable preferences degrade to the defaults rather than
    /// failing, so this only errors when the directory itself cannot be
    /// made.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        tokio::fs::create_dir_all(&maybe_relative)
            .await
            .context("Unable to create the rab home directory")?;
        let root = tokio::fs::canonicalize(&maybe_relative)
            .await
            .with_context(|| format!("Unable to canonicalize '{}'", maybe_relative.display()))?;
        let prefs_path = root.join(PREFS_JSON);
        let prefs = Prefs::load_or_default(&prefs_path).await;
        Ok(Self {
            document_path: root.join(DOCUMENT_JSON),
            root,
            prefs_path,
            prefs,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefs_path(&self) -> &Path {
        &self.prefs_path
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn language(&self) -> Language {
        self.prefs.language()
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    /// The message table for the configured language.
    pub fn messages(&self) -> &'static Messages {
        self.language().messages()
    }

    /// A store for the working document at its home-directory location.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.document_path)
    }

    /// Writes `prefs` to disk and adopts them for this process.
    pub async fn save_prefs(&mut self, prefs: Prefs) -> Result<()> {
        prefs.save(&self.prefs_path).await?;
        self.prefs = prefs;
        Ok(())
    }
}

/// Represents the serialization format of the preferences file.
///
/// Example:
/// ```json
/// {
///   "app_name": "rab",
///   "prefs_version": 1,
///   "language": "id",
///   "theme": "dark"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Prefs {
    /// Application name, should always be "rab"
    #[serde(default = "default_app_name")]
    app_name: String,

    /// Preferences file version
    #[serde(default = "default_prefs_version")]
    prefs_version: u8,

    #[serde(default)]
    language: Language,

    #[serde(default)]
    theme: Theme,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            prefs_version: PREFS_VERSION,
            language: Language::default(),
            theme: Theme::default(),
        }
    }
}

impl Prefs {
    /// Loads the preferences, falling back to the defaults when the file is
    /// missing, unreadable or belongs to some other program. A bad
    /// preferences file should never keep the editor from starting.
    pub async fn load_or_default(path: &Path) -> Self {
        if !path.is_file() {
            return Self::default();
        }
        match utils::deserialize::<Prefs>(path).await {
            Ok(prefs) if prefs.app_name == APP_NAME => prefs,
            Ok(prefs) => {
                warn!(
                    "Ignoring preferences with unexpected app_name '{}'",
                    prefs.app_name
                );
                Self::default()
            }
            Err(e) => {
                warn!("Unable to load the preferences, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data =
            serde_json::to_string_pretty(self).context("Unable to serialize the preferences")?;
        utils::write(path, data)
            .await
            .context("Unable to write the preferences file")
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

fn default_app_name() -> String {
    APP_NAME.to_string()
}

fn default_prefs_version() -> u8 {
    PREFS_VERSION
}

/// The table color scheme.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

serde_plain::derive_display_from_serialize!(Theme);
serde_plain::derive_fromstr_from_deserialize!(Theme);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_the_home_directory() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("rab");
        let config = Config::open(&home).await.unwrap();
        assert!(config.root().is_dir());
        assert!(config.document_path().ends_with(DOCUMENT_JSON));
        assert_eq!(config.language(), Language::Id);
        assert_eq!(config.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_prefs_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFS_JSON);
        let mut prefs = Prefs::default();
        prefs.set_language(Language::En);
        prefs.set_theme(Theme::Light);
        prefs.save(&path).await.unwrap();
        let loaded = Prefs::load_or_default(&path).await;
        assert_eq!(loaded, prefs);
    }

    #[tokio::test]
    async fn test_corrupt_prefs_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFS_JSON);
        std::fs::write(&path, "}{").unwrap();
        assert_eq!(Prefs::load_or_default(&path).await, Prefs::default());
    }

    #[tokio::test]
    async fn test_foreign_prefs_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFS_JSON);
        std::fs::write(&path, r#"{"app_name":"catatan","language":"en"}"#).unwrap();
        assert_eq!(Prefs::load_or_default(&path).await, Prefs::default());
    }

    #[tokio::test]
    async fn test_prefs_with_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFS_JSON);
        std::fs::write(&path, r#"{"language":"en"}"#).unwrap();
        let prefs = Prefs::load_or_default(&path).await;
        assert_eq!(prefs.language(), Language::En);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_save_prefs_updates_the_config() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("rab");
        let mut config = Config::open(&home).await.unwrap();
        let mut prefs = config.prefs().clone();
        prefs.set_language(Language::En);
        config.save_prefs(prefs).await.unwrap();
        assert_eq!(config.language(), Language::En);

        let reopened = Config::open(&home).await.unwrap();
        assert_eq!(reopened.language(), Language::En);
    }

    #[test]
    fn test_theme_string_forms() {
        assert_eq!(Theme::from_str("light").unwrap(), Theme::Light);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
