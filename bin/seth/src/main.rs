//! Seth - EVM account and contract transactions over a permissioned ledger.

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod batch;
mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.load_config()?;

    let filter = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .init();

    cli.run(config)
}
