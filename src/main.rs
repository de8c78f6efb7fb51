//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redir` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use redir::initialization::init_logger_with;
use redir::{run_traces, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Unknown --output values and other usage errors exit here with a clap error
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_traces(config).await {
        Ok(report) => {
            log::info!(
                "Traced {} URL{} ({} succeeded, {} failed) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("redir error: {:#}", e);
            process::exit(1);
        }
    }
}
