use clap::Parser;
use rab_maker::args::{Args, Command};
use rab_maker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config = Config::open(args.common().rab_home().path()).await?;

    // Route to the appropriate command handler
    let _: () = match args.command() {
        Command::Show => commands::show(config).await?,

        Command::Print => commands::print_view(config).await?,

        Command::Edit => commands::edit(config).await?,

        Command::Add(add_args) => commands::add(config, add_args.module()).await?.print(),

        Command::Delete(delete_args) => {
            commands::delete(config, delete_args.row(), delete_args.yes())
                .await?
                .print()
        }

        Command::Set(set_args) => {
            commands::set_field(config, set_args.row(), set_args.field(), set_args.value())
                .await?
                .print()
        }

        Command::Title(title_args) => commands::set_title(config, title_args.title())
            .await?
            .print(),

        Command::Image(image_args) => {
            commands::image(
                config,
                image_args.row(),
                image_args.file(),
                image_args.clear(),
            )
            .await?
            .print()
        }

        Command::Import(import_args) => commands::import(config, import_args.file())
            .await?
            .print(),

        Command::Export(export_args) => commands::export(config, export_args.file())
            .await?
            .print(),

        Command::New(new_args) => commands::new(config, new_args.yes()).await?.print(),

        Command::Config(config_args) => {
            commands::config(
                config,
                config_args.language(),
                config_args.theme(),
                config_args.detect_language(),
            )
            .await?
            .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
