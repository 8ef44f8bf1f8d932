mod cli;
mod commands;
mod exit;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use commands::RunOptions;
use dedupchain_core::dedup::CancelToken;
use exit::ExitStatus;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    // Ctrl+C stops the run between directory visits
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\n\nInterrupted by user (Ctrl+C), stopping after the current directory");
        handler_token.cancel();
    }) {
        log::warn!("Failed to set Ctrl+C handler: {e}");
    }

    let options = RunOptions::new(cli.dry_run, cli.sequential, cancel);

    let outcome = match &cli.command {
        Commands::Run { config } => commands::Run::execute(config, &options),
        Commands::Batch { list } => commands::Batch::execute(list, &options),
        Commands::Pair {
            reference,
            candidate,
            policy,
        } => commands::Pair::execute(reference, candidate, policy, &options),
        Commands::Init { path } => commands::Init::execute(path),
    };

    let status = outcome.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        ExitStatus::for_error(&e)
    });

    status.into()
}
