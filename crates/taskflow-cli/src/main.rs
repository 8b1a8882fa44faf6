//! TaskFlow CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use taskflow_cli::cli::Cli;
use taskflow_cli::{commands, config};

fn main() {
    // Load .env.local if it exists (for TASKFLOW_STATE_DIR etc.)
    config::load_env_file();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let state_dir = cli.state_dir();

    if let Err(e) = commands::execute(cli.command, &state_dir) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
