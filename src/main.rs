//! ticket-store - session ticket cache tool
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use ticket_store::cli::{Cli, Commands};
use ticket_store::config::ConfigManager;
use ticket_store::error::TicketStoreResult;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> TicketStoreResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("ticket_store=warn"),
        1 => EnvFilter::new("ticket_store=info"),
        _ => EnvFilter::new("ticket_store=debug"),
    };

    if config.general.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    let ticket_path = ConfigManager::ticket_path(cli.file.as_deref(), &config);
    debug!("Using ticket file: {}", ticket_path.display());

    match cli.command {
        Commands::List(args) => ticket_store::cli::commands::list(args, &config, &ticket_path).await,
        Commands::Lookup(args) => {
            ticket_store::cli::commands::lookup(args, &config, &ticket_path).await
        }
        Commands::Import(args) => {
            ticket_store::cli::commands::import(args, &config, &ticket_path).await
        }
        Commands::Prune => ticket_store::cli::commands::prune(&config, &ticket_path).await,
        Commands::Config(args) => {
            ticket_store::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
