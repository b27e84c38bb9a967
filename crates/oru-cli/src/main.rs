//! Lab report risk analysis CLI.

use std::process::ExitCode;

use clap::Parser;
use oru_cli::logging::init_logging;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_analyse, run_metrics};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    let result = match &cli.command {
        Command::Analyse(args) => run_analyse(args),
        Command::Metrics(args) => run_metrics(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
