//! # paperstats
//!
//! Scrapes the 2020 Nature Reviews Disease Primers and prints, for every
//! article, its authors with their affiliation countries and a per-country
//! count, followed by the totals across all articles.
//!
//! ## Usage
//!
//! ```sh
//! paperstats > report.txt
//! RUST_LOG=debug paperstats --format json
//! ```
//!
//! The report goes to stdout; logs go to stderr.

use std::error::Error;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use paperstats::Config;
use paperstats::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("paperstats starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let config = Config::from(args);

    let mut stdout = std::io::stdout().lock();
    let report = paperstats::run(&config, &mut stdout)
        .await
        .inspect_err(|e| error!(error = %e, "Run aborted"))?;

    info!(articles = report.articles.len(), "Execution complete");
    Ok(())
}
