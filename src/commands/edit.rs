//! The `rab edit` command: a line-oriented interactive editor.

use crate::commands::{is_yes, open_session, row_index};
use crate::config::Config;
use crate::error::Result;
use crate::image::encode_data_uri;
use crate::model::ItemField;
use crate::render;
use crate::session::Session;
use crate::utils;
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Runs the editor loop until `quit` or end of input. The table is redrawn
/// after every change, prompts and feedback go to stderr, and only `quit`
/// and a handful of hard stdin failures end the loop; a bad command or a bad
/// row number just prints and keeps going.
pub async fn edit(config: Config) -> Result<()> {
    let messages = config.messages();
    let mut session = open_session(&config).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render_table(&session, &config);
    eprintln!("{}", messages.editor_hint);

    loop {
        eprint!("rab> ");
        let line = match next(&mut lines).await? {
            Some(line) => line,
            None => break,
        };
        match EditorCommand::parse(&line) {
            EditorCommand::Empty => {}
            EditorCommand::Quit => break,
            EditorCommand::Help => eprintln!("{}", messages.editor_help),
            EditorCommand::Unknown => eprintln!("{}", messages.unknown_command),
            EditorCommand::Show => render_table(&session, &config),
            EditorCommand::Print => {
                println!("{}", render::printable(session.document(), messages));
            }
            EditorCommand::Add { module } => {
                match &module {
                    Some(module) => {
                        session.add_row_to_module(module).await;
                        eprintln!("{}", messages.row_added_to_module(module));
                    }
                    None => {
                        session.add_row().await;
                        eprintln!("{}", messages.row_added);
                    }
                }
                render_table(&session, &config);
            }
            EditorCommand::Delete { row } => {
                match delete_row(&mut session, &config, &mut lines, row).await {
                    Ok(true) => render_table(&session, &config),
                    Ok(false) => eprintln!("{}", messages.cancelled),
                    Err(e) => eprintln!("{e}"),
                }
            }
            EditorCommand::Set { row, field, value } => {
                match set_cell(&mut session, row, &field, &value).await {
                    Ok(()) => render_table(&session, &config),
                    Err(e) => eprintln!("{e}"),
                }
            }
            EditorCommand::Title { title } => {
                session.set_title(title).await;
                eprintln!("{}", messages.title_updated);
                render_table(&session, &config);
            }
            EditorCommand::Image { row, file } => {
                match attach_image(&mut session, row, file.as_deref()).await {
                    Ok(true) => {
                        eprintln!("{}", messages.image_set);
                        render_table(&session, &config);
                    }
                    Ok(false) => {
                        eprintln!("{}", messages.image_cleared);
                        render_table(&session, &config);
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            EditorCommand::Undo => {
                if session.undo() {
                    eprintln!("{}", messages.undo_done);
                    render_table(&session, &config);
                } else {
                    eprintln!("{}", messages.nothing_to_undo);
                }
            }
            EditorCommand::Redo => {
                if session.redo() {
                    eprintln!("{}", messages.redo_done);
                    render_table(&session, &config);
                } else {
                    eprintln!("{}", messages.nothing_to_redo);
                }
            }
            EditorCommand::New => {
                if ask(&mut lines, messages.confirm_new_document).await? {
                    session.reset().await;
                    eprintln!("{}", messages.document_reset);
                    render_table(&session, &config);
                } else {
                    eprintln!("{}", messages.cancelled);
                }
            }
            EditorCommand::Import { file } => match import_file(&mut session, &file).await {
                Ok(()) => {
                    eprintln!("{}", messages.import_done);
                    render_table(&session, &config);
                }
                Err(e) => {
                    warn!("Import failed: {e}");
                    eprintln!("{}", messages.import_failed);
                }
            },
            EditorCommand::Export { file } => match export_file(&session, file).await {
                Ok(path) => eprintln!("{} ({})", messages.export_done, path.display()),
                Err(e) => eprintln!("{e}"),
            },
        }
    }
    Ok(())
}

fn render_table(session: &Session, config: &Config) {
    println!("{}", session.document().title());
    println!(
        "{}",
        render::document_table(session.document(), config.messages(), config.theme())
    );
}

async fn next(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    lines
        .next_line()
        .await
        .context("Unable to read from stdin")
}

/// Prints `prompt` and reads a y/N answer from the editor's own line stream.
async fn ask(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    match next(lines).await? {
        Some(answer) => Ok(is_yes(&answer)),
        None => Ok(false),
    }
}

async fn delete_row(
    session: &mut Session,
    config: &Config,
    lines: &mut Lines<BufReader<Stdin>>,
    row: usize,
) -> Result<bool> {
    let index = row_index(row)?;
    let name = session.document().item(index)?.name().to_string();
    if !ask(lines, &config.messages().confirm_delete(&name)).await? {
        return Ok(false);
    }
    session.delete_row(index).await?;
    Ok(true)
}

async fn set_cell(session: &mut Session, row: usize, field: &str, value: &str) -> Result<()> {
    let field = ItemField::from_str(field).map_err(|_| anyhow!("Unknown column '{field}'"))?;
    session.update_field(row_index(row)?, field, value).await?;
    Ok(())
}

/// Returns true when an image was attached, false when the row's image was
/// cleared.
async fn attach_image(session: &mut Session, row: usize, file: Option<&Path>) -> Result<bool> {
    let index = row_index(row)?;
    match file {
        Some(file) => {
            let data_uri = encode_data_uri(file).await?;
            session.set_image(index, data_uri).await?;
            Ok(true)
        }
        None => {
            session.clear_image(index).await?;
            Ok(false)
        }
    }
}

async fn import_file(session: &mut Session, file: &Path) -> Result<()> {
    let raw = utils::read(file).await?;
    session.import(&raw).await?;
    Ok(())
}

async fn export_file(session: &Session, file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match file {
        Some(file) => file,
        None => PathBuf::from(session.document().export_file_name()),
    };
    utils::write(&path, session.export_json()?).await?;
    Ok(path)
}

/// One line of editor input, parsed structurally. Whether a row number or
/// column name actually refers to anything is checked by the handlers.
#[derive(Debug, Clone, Eq, PartialEq)]
enum EditorCommand {
    Show,
    Print,
    Add { module: Option<String> },
    Delete { row: usize },
    Set { row: usize, field: String, value: String },
    Title { title: String },
    Image { row: usize, file: Option<PathBuf> },
    Undo,
    Redo,
    New,
    Import { file: PathBuf },
    Export { file: Option<PathBuf> },
    Help,
    Quit,
    Empty,
    Unknown,
}

impl EditorCommand {
    fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let first = match tokens.first() {
            Some(first) => first.to_ascii_lowercase(),
            None => return Self::Empty,
        };
        let rest = |from: usize| tokens.get(from..).unwrap_or_default().join(" ");
        match first.as_str() {
            "show" => Self::Show,
            "print" => Self::Print,
            "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "u" | "undo" => Self::Undo,
            "r" | "redo" => Self::Redo,
            "new" => Self::New,
            "add" => Self::Add {
                module: tokens.get(1).map(|token| (*token).to_string()),
            },
            "del" | "delete" => match parse_row(tokens.get(1)) {
                Some(row) => Self::Delete { row },
                None => Self::Unknown,
            },
            "set" => match (parse_row(tokens.get(1)), tokens.get(2)) {
                (Some(row), Some(field)) => Self::Set {
                    row,
                    field: (*field).to_string(),
                    value: rest(3),
                },
                _ => Self::Unknown,
            },
            "title" => {
                let title = rest(1);
                if title.is_empty() {
                    Self::Unknown
                } else {
                    Self::Title { title }
                }
            }
            "img" | "image" => match parse_row(tokens.get(1)) {
                Some(row) => {
                    let file = rest(2);
                    Self::Image {
                        row,
                        file: if file.is_empty() {
                            None
                        } else {
                            Some(PathBuf::from(file))
                        },
                    }
                }
                None => Self::Unknown,
            },
            "import" => {
                let file = rest(1);
                if file.is_empty() {
                    Self::Unknown
                } else {
                    Self::Import {
                        file: PathBuf::from(file),
                    }
                }
            }
            "export" => {
                let file = rest(1);
                Self::Export {
                    file: if file.is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(file))
                    },
                }
            }
            _ => Self::Unknown,
        }
    }
}

fn parse_row(token: Option<&&str>) -> Option<usize> {
    token.and_then(|token| token.parse().ok())
}
