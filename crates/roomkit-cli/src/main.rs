//! roomkit CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use roomkit_core::{TracingConfig, init_tracing};
use tracing::debug;

use roomkit_cli::cli::{Cli, Command, ConfigAction};
use roomkit_cli::commands::{self, decode::DecodeOptions};
use roomkit_cli::config::CliConfig;
use roomkit_cli::error::ClientResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        config.tracing_config()?
    };
    init_tracing(tracing_config)?;

    // Config commands report on the file as written, so only event commands see the
    // disabled types removed.
    if !matches!(cli.command, Command::Config { .. }) {
        for tag in &config.events.disabled_types {
            if roomkit_events::unregister_type(tag).is_some() {
                debug!(tag = %tag, "disabled event type");
            }
        }
    }

    match cli.command {
        Command::Decode {
            file,
            event_type,
            pretty,
        } => commands::decode::run(
            file.as_deref(),
            &DecodeOptions {
                event_type: event_type.as_deref(),
                pretty: pretty || config.events.pretty,
            },
        ),
        Command::Types => commands::types::run(),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
