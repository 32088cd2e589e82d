//! mdsbom-action -- CI entry point for the Mayhem dynamic SBOM action
//!
//! Parses the global flags, initialises logging and dispatches to a command
//! handler. Errors are mapped to process exit codes by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod github;
mod logging;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::CliError;
use output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(&cli.log_level, cli.log_format) {
        let err = CliError::Config(e.to_string());
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }

    let writer = OutputWriter::new(cli.output);

    let result = match cli.command {
        None => commands::run::execute(Default::default(), &writer).await,
        Some(Commands::Run(args)) => commands::run::execute(args, &writer).await,
        Some(Commands::Render(args)) => commands::render::execute(args, &writer),
        Some(Commands::Inputs) => commands::inputs::execute(&writer),
    };

    match result {
        Ok(()) => {}
        // Already reported to the runner as a workflow error
        Err(e @ CliError::Failed(_)) => std::process::exit(e.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
