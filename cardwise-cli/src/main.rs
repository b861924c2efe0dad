mod cli;
mod config;
mod deckfile;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use tokio::runtime::Runtime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cli::commands::run_cli;
use cli::opts::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let rt = Runtime::new()?;
    rt.block_on(run_cli(args))
}
