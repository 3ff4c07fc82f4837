//! Salesloft Cog Cache - Entry Point

use std::process::ExitCode;

use clap::Parser;
use slc::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    run(cli).await
}
