//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// roomkit - decode and inspect chat events
#[derive(Debug, Parser)]
#[command(name = "roomkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ROOMKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode an event (or a JSON array of events) and print it back
    Decode {
        /// File to read; stdin when omitted or `-`
        file: Option<PathBuf>,

        /// Decode as this event type instead of the document's own `type`
        #[arg(long = "type", short = 't')]
        event_type: Option<String>,

        /// Pretty-print the re-encoded JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List registered event and message types
    Types,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
