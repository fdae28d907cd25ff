//! Binary crate for the `yr` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Fetching the compact location forecast
//! - Printing the one-line current-conditions summary

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
