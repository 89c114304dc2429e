//! Main entry point for the dna_insight application.

use anyhow::Result;
use clap::Parser;
use dna_insight::cli::{run_cli, Cli};
use log::info;

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG controls the level)
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting with command: {:?}", cli.command);

    run_cli(cli)
}
