mod commands;
mod output;
mod utils;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::output::{print_error, print_info};

#[derive(Parser, Debug)]
#[command(name = "winguest")]
#[command(about = "WinGuest - Configure network interfaces on Windows guests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    #[arg(short, long, global = true, help = "Verbose output")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Quiet output")]
    quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Output format",
        value_enum,
        default_value = "table"
    )]
    format: output::OutputFormat,

    #[arg(
        short,
        long,
        global = true,
        env = "WINGUEST_CONFIG",
        help = "Path to the configuration file (default: ~/.winguest/config.yaml)"
    )]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = utils::load_config(cli.config.as_deref())?;
    tracing::debug!("Loaded configuration for machine {}", config.machine.name);

    if let Err(e) = commands::execute(cli.command, config, cli.format).await {
        print_error(&e.to_string());
        if let Some(hint) = utils::failure_hint(&e) {
            print_info(hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
