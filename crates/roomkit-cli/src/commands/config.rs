//! Configuration commands.

use roomkit_events::{Event, TypeRegistry};

use crate::config::CliConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &CliConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::config(format!("failed to serialize config: {e}")))?;
    println!("# config.toml ({})", CliConfig::default_path().display());
    println!("{toml_str}");
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &CliConfig) -> ClientResult<()> {
    config.validate()?;
    let builtin = TypeRegistry::with_builtin_events();
    for tag in unknown_disabled_types(config, &builtin) {
        println!("note: disabled type {tag} is not registered");
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Disabled type names that `registry` has no handler for.
fn unknown_disabled_types<'a>(
    config: &'a CliConfig,
    registry: &TypeRegistry<dyn Event>,
) -> Vec<&'a str> {
    config
        .events
        .disabled_types
        .iter()
        .map(String::as_str)
        .filter(|tag| registry.lookup(tag).is_none())
        .collect()
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    println!("config: {}", CliConfig::default_path().display());
    Ok(())
}
