//! Binary crate for the `ip2data` command-line dashboard.
//!
//! This crate focuses on:
//! - Driving one aggregation request with staged-progress feedback
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod progress;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
