//! # paperstats
//!
//! Counts where the authors of one year of Nature Reviews Disease Primers
//! come from.
//!
//! ## Architecture
//!
//! 1. **Indexing**: fetch the yearly listing and order the articles by
//!    publication date ([`scrapers::index`])
//! 2. **Fetching**: download and parse every article page concurrently
//!    ([`scrapers::article`], [`pipeline::fetch_articles`])
//! 3. **Tallying**: attribute each author to their first listed country and
//!    sum the per-article tallies ([`models::CountryTally`])
//! 4. **Output**: per-article blocks and totals as text, or one JSON document
//!    ([`outputs`])
//!
//! Any network or parse failure aborts the run.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use pipeline::run;
