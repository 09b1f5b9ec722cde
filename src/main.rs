use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use gitlabber::cli::{Cli, Command};
use gitlabber::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Agent) => match startup::run(cli.global).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Gitlabber agent failed");
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        None => {
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
