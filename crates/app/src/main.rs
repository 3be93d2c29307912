use std::{io, process::ExitCode};

use clap::Parser;

use error::{AppError, Result};
use settings::Args;

mod commands;
mod error;
mod menu;
mod report;
mod settings;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Engine(err)) if err.is_recoverable() => {
            eprintln!("{}", report::user_message(&err));
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("ledger: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = settings::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger={level},engine={level},ledger_tui={level}",
            level = settings.log_level
        ))
        .with_writer(io::stderr)
        .init();

    let mut engine = engine::Engine::builder().path(&settings.file).build()?;
    tracing::info!("using {}", engine.path().display());

    match args.command {
        Some(command) => commands::run(&mut engine, command, &mut io::stdout().lock()),
        None => menu::Menu::new(&mut engine, io::stdin().lock(), io::stdout().lock()).run(),
    }
}
