//! lumpcat binary entry point.
//!
//! Thin wrapper around `lumpcat_containers::cli` that parses arguments,
//! initializes logging and runs the selected command.

use anyhow::Result;
use clap::Parser;
use lumpcat_containers::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut stdout = std::io::stdout().lock();
    cli::run(cli, &mut stdout)
}
