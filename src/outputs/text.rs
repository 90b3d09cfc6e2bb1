//! Plain-text report.
//!
//! Each article is rendered as:
//!
//! ```text
//! 09 January 2020
//!   Sepsis - https://www.nature.com/articles/...
//!
//! 	Jane Doe                      	United Kingdom
//! 	John Smith                    	United Kingdom, France
//!
//! 	United Kingdom      	2
//! ```
//!
//! followed by two newlines. After the last article comes the `-- TOTAL --`
//! banner and the global tally with country names upper-cased.

use std::io::Write;

use itertools::Itertools;

use crate::error::Result;
use crate::models::{ArticleReport, CountryTally};

const AUTHOR_WIDTH: usize = 30;
const COUNTRY_WIDTH: usize = 20;
const TOTALS_BANNER: &str = "\n\n-- TOTAL --\n\n";

/// Write one article block and its trailing blank separator line.
pub fn write_article<W: Write>(out: &mut W, report: &ArticleReport) -> Result<()> {
    writeln!(out, "{}", report.date)?;
    writeln!(out, "  {} - {}", report.title, report.url)?;
    writeln!(out)?;

    for author in &report.authors {
        writeln!(
            out,
            "\t{:<width$}\t{}",
            author.name,
            author.countries.iter().join(", "),
            width = AUTHOR_WIDTH
        )?;
    }
    writeln!(out)?;

    write_tally(out, &report.tally, |country| country.to_string())?;
    writeln!(out)?;
    writeln!(out)?;
    Ok(())
}

/// Write the totals banner and the global tally.
///
/// Countries are ordered by their stored name and upper-cased for display only.
pub fn write_totals<W: Write>(out: &mut W, totals: &CountryTally) -> Result<()> {
    writeln!(out, "{}", TOTALS_BANNER)?;
    write_tally(out, totals, str::to_uppercase)
}

fn write_tally<W, F>(out: &mut W, tally: &CountryTally, display: F) -> Result<()>
where
    W: Write,
    F: Fn(&str) -> String,
{
    for (country, count) in tally.iter() {
        writeln!(
            out,
            "\t{:<width$}\t{}",
            display(country),
            count,
            width = COUNTRY_WIDTH
        )?;
    }
    Ok(())
}
