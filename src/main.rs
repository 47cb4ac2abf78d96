use anyhow::Result;
use cardcodec::normalize;
use clap::Parser;
use tracing::{Level, debug};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if normalize::install(cli.normalizer.into()) {
        debug!(normalizer = normalize::current().name(), "installed text normalizer");
    }

    cli::run(cli)
}
