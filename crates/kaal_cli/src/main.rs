mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use kaal_rs::{Almanac, AlmanacConfig};
use tracing::info;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    info!(
        ayanamsha = %config.frame.ayanamsha,
        nutation = config.frame.nutation,
        "almanac configured"
    );
    let almanac = Almanac::analytic(&config).context("building almanac")?;
    commands::run(&almanac, cli.command)
}

/// File configuration (or defaults) with command-line frame overrides applied.
fn load_config(cli: &Cli) -> Result<AlmanacConfig> {
    let mut config = match &cli.config {
        Some(path) => AlmanacConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AlmanacConfig::default(),
    };
    if let Some(ayanamsha) = cli.ayanamsha {
        config.frame.ayanamsha = ayanamsha;
    }
    if cli.nutation {
        config.frame.nutation = true;
    }
    Ok(config)
}
