//! JSON report.
//!
//! The whole [`Report`] is serialized once every article has been parsed:
//!
//! ```text
//! {
//!   "articles": [
//!     { "date": ..., "title": ..., "url": ...,
//!       "authors": [{ "name": ..., "countries": [...] }],
//!       "tally": { "<country>": <count> } }
//!   ],
//!   "totals": { "<country>": <count> }
//! }
//! ```

use std::io::Write;

use tracing::{info, instrument};

use crate::error::Result;
use crate::models::Report;

#[instrument(level = "info", skip_all, fields(articles = report.articles.len()))]
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    info!(countries = report.totals.len(), "Wrote JSON report");
    Ok(())
}
