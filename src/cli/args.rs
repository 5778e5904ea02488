//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ticket-store - TLS/QUIC session ticket cache
///
/// Inspects and maintains the resumption ticket file a client keeps
/// between runs.
#[derive(Parser, Debug)]
#[command(name = "ticket-store")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TICKET_STORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ticket file path (defaults to store.path from config)
    #[arg(short, long, global = true, env = "TICKET_STORE_FILE")]
    pub file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored tickets
    List(ListArgs),

    /// Look up the ticket for a server name and protocol
    Lookup(LookupArgs),

    /// Store a raw ticket blob read from a file
    Import(ImportArgs),

    /// Drop expired tickets from the ticket file
    Prune,

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Include expired tickets
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the lookup command
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Server name indication
    #[arg(long)]
    pub sni: String,

    /// Application protocol (e.g. h3)
    #[arg(long)]
    pub alpn: String,

    /// Print the ticket payload as hex
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for the import command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Server name indication
    #[arg(long)]
    pub sni: String,

    /// Application protocol (e.g. h3)
    #[arg(long)]
    pub alpn: String,

    /// File holding the raw ticket as received from the server
    pub blob: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
