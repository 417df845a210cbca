//! Sanoma CLI - Analyze an extracted mailbox dataset.

use clap::Parser;
use sanoma_cli::commands;
use sanoma_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> sanoma_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Filter(args) => commands::execute_filter(args, &formatter),
        Command::Query(args) => commands::execute_query(args, &formatter),
        Command::Stats(args) => commands::execute_stats(args, &formatter),
        Command::Domains(args) => commands::execute_domains(args, &config.analysis, &formatter),
        Command::Timeline(args) => commands::execute_timeline(args, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter)
        }
    }
}
