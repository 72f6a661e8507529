//! These structs provide the CLI interface for the rab CLI.

use crate::config::Theme;
use crate::lang::Language;
use crate::model::ItemField;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// rab: A command-line RAB (Rencana Anggaran Biaya) editor.
///
/// The purpose of this program is to keep a project budget plan as a local
/// JSON document that you edit from the terminal. Every change is saved to
/// the rab home directory right away and recorded in an undo/redo history,
/// and the whole document can be imported from and exported to plain JSON
/// files for sharing.
///
/// Run `rab edit` for an interactive prompt, or use the one-shot subcommands
/// from scripts. Row numbers are the ones shown in the table's first column.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Display the RAB table with module groupings and the grand total.
    Show,
    /// Display a plain, printer-friendly rendition of the document.
    Print,
    /// Open the interactive editor.
    ///
    /// The editor reads one command per line and redraws the table after
    /// every change. Type 'help' inside the editor for the command list.
    /// This is the only place where undo and redo are available, because
    /// the history lives with the running editor rather than on disk.
    Edit,
    /// Add a new component row with placeholder values.
    Add(AddArgs),
    /// Delete a component row.
    Delete(DeleteArgs),
    /// Change one cell of a component row.
    Set(SetArgs),
    /// Change the project title.
    Title(TitleArgs),
    /// Attach an image to a component row, or remove one.
    Image(ImageArgs),
    /// Replace the document with one imported from a JSON file.
    Import(ImportArgs),
    /// Export the document to a JSON file.
    Export(ExportArgs),
    /// Start a new document from the built-in template, discarding the
    /// current document and its history.
    New(NewArgs),
    /// Show or change the language and theme preferences.
    Config(ConfigArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the rab document and preferences are held.
    /// Defaults to ~/rab
    #[arg(long, env = "RAB_HOME", default_value_t = default_rab_home())]
    rab_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, rab_home: PathBuf) -> Self {
        Self {
            log_level,
            rab_home: rab_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn rab_home(&self) -> &DisplayPath {
        &self.rab_home
    }
}

/// (Not shown): Args for the `rab add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Place the new row after the last row of this module instead of at the
    /// end of the document.
    module: Option<String>,
}

impl AddArgs {
    pub fn new(module: Option<String>) -> Self {
        Self { module }
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

/// (Not shown): Args for the `rab delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The row number to delete, as shown in the No. column.
    row: usize,

    /// Skip the confirmation prompt.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(row: usize, yes: bool) -> Self {
        Self { row, yes }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// (Not shown): Args for the `rab set` command.
#[derive(Debug, Parser, Clone)]
pub struct SetArgs {
    /// The row number to change, as shown in the No. column.
    row: usize,

    /// The column to change.
    field: ItemField,

    /// The new value. Numeric columns take bare integers, anything else is
    /// text.
    value: String,
}

impl SetArgs {
    pub fn new(row: usize, field: ItemField, value: impl Into<String>) -> Self {
        Self {
            row,
            field,
            value: value.into(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn field(&self) -> ItemField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// (Not shown): Args for the `rab title` command.
#[derive(Debug, Parser, Clone)]
pub struct TitleArgs {
    /// The new project title.
    title: String,
}

impl TitleArgs {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// (Not shown): Args for the `rab image` command.
#[derive(Debug, Parser, Clone)]
pub struct ImageArgs {
    /// The row number, as shown in the No. column.
    row: usize,

    /// The image file to attach. It is embedded into the document as a
    /// data: URI.
    file: Option<PathBuf>,

    /// Remove the row's image.
    #[arg(long, conflicts_with = "file")]
    clear: bool,
}

impl ImageArgs {
    pub fn new(row: usize, file: Option<PathBuf>, clear: bool) -> Self {
        Self { row, file, clear }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn clear(&self) -> bool {
        self.clear
    }
}

/// (Not shown): Args for the `rab import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The JSON file to import.
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// (Not shown): Args for the `rab export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// Where to write the JSON file. Defaults to a name derived from the
    /// project title, in the current directory.
    file: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

/// (Not shown): Args for the `rab new` command.
#[derive(Debug, Parser, Clone)]
pub struct NewArgs {
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    yes: bool,
}

impl NewArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// (Not shown): Args for the `rab config` command.
#[derive(Debug, Parser, Clone)]
pub struct ConfigArgs {
    /// Set the display language.
    #[arg(long)]
    language: Option<Language>,

    /// Set the table color theme.
    #[arg(long)]
    theme: Option<Theme>,

    /// Detect the language from this machine's country and save it.
    #[arg(long, conflicts_with = "language")]
    detect_language: bool,
}

impl ConfigArgs {
    pub fn new(language: Option<Language>, theme: Option<Theme>, detect_language: bool) -> Self {
        Self {
            language,
            theme,
            detect_language,
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn detect_language(&self) -> bool {
        self.detect_language
    }
}

fn default_rab_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("rab"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --rab-home or RAB_HOME instead of relying on the default rab \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("rab")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
