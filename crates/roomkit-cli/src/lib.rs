//! The `roomkit` command-line tool.
//!
//! Decodes event documents through the event registry, re-encodes them, and
//! reports what was understood.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{ClientError, ClientResult};
