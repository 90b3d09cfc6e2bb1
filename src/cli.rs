//! Command-line interface definitions for paperstats.
//!
//! Every option has a default, so running the binary with no arguments
//! reports on the 2020 primers from nature.com.

use clap::Parser;

use crate::config::{BASE_URL, Config, OutputFormat, YEAR};
use crate::utils::default_jobs;

/// Tally the countries of author affiliations across one year of
/// Nature Reviews Disease Primers.
///
/// # Examples
///
/// ```sh
/// # Default run
/// paperstats
///
/// # JSON output with more verbose logging on stderr
/// RUST_LOG=debug paperstats --format json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Site origin (scheme and host only, no path) the index page and article links are fetched from
    #[arg(long, env = "PAPERSTATS_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Publication year to report on
    #[arg(short, long, default_value_t = YEAR)]
    pub year: u16,

    /// Maximum number of article pages fetched concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            base_url: cli.base_url,
            year: cli.year,
            jobs: cli.jobs.unwrap_or_else(default_jobs).max(1),
            format: cli.format,
        }
    }
}
