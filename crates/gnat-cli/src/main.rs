//! `gnat`: compute the second-order causal activity graph of a spiking
//! neural network using a quadtree-based spatial-search kernel.

use clap::Parser;
use gnat_cli::{run, CliResult, GnatArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let args = GnatArgs::parse();

    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }

    Ok(())
}
