//! Run configuration.
//!
//! [`Config::default`] is the fixed target: the 2020 primers on
//! `https://www.nature.com`. The CLI only overrides it.

use url::Url;

use crate::error::{Error, Result};
use crate::utils::default_jobs;

pub const BASE_URL: &str = "https://www.nature.com";
pub const YEAR: u16 = 2020;
const INDEX_PATH: &str = "/nrdp/articles";
const ARTICLE_TYPE: &str = "primer";

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Per-article blocks followed by the totals
    #[default]
    Text,
    /// One JSON document once every article is parsed
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Site origin such as `https://www.nature.com`. The index path and the
    /// site-relative article links are resolved against its root, so a base
    /// URL carrying a path, query or fragment is rejected.
    pub base_url: String,
    pub year: u16,
    /// Maximum number of article pages fetched at once.
    pub jobs: usize,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            year: YEAR,
            jobs: default_jobs(),
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn base(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        let bare_origin = !url.cannot_be_a_base()
            && url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none();
        if !bare_origin {
            return Err(Error::Config {
                message: format!("base URL must be a bare origin, got {:?}", self.base_url),
            });
        }
        Ok(url)
    }

    /// `<origin>/nrdp/articles?type=primer&year=<year>`
    pub fn index_url(&self) -> Result<Url> {
        let mut url = self.base()?.join(INDEX_PATH)?;
        url.query_pairs_mut()
            .append_pair("type", ARTICLE_TYPE)
            .append_pair("year", &self.year.to_string());
        Ok(url)
    }
}
