//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    if args.write {
        let saved = config.save(path)?;
        println!(
            "{}",
            formatter.success(&format!("Configuration written to {}", saved.display()))
        );
        return Ok(());
    }

    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => print!("{}", config.to_toml()?),
    }
    Ok(())
}
