pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pricely",
    about = "Pricely operator CLI",
    long_about = "Evaluate pricing scenarios offline, inspect effective configuration, and run readiness checks.",
    after_help = "Examples:\n  pricely evaluate scenario.json --pretty\n  pricely config\n  pricely doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Evaluate a pricing scenario file and print the resulting breakdown")]
    Evaluate {
        #[arg(help = "Path to a JSON scenario file")]
        file: PathBuf,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate configuration and collaborator reachability settings")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Evaluate { file, pretty } => commands::evaluate::run(&file, pretty),
        Command::Config => commands::CommandResult { exit_code: 0, output: commands::config::run() },
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
