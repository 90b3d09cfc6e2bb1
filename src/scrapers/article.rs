//! Article page scraper.
//!
//! Pulls the publication date, the title and the author affiliation list out
//! of a single article page and turns the list into a per-article
//! [`CountryTally`].
//!
//! # Affiliation markup
//!
//! ```html
//! <ol class="c-article-author-affiliation__list">
//!   <li>
//!     <p class="c-article-author-affiliation__address">Dept, University, Cambridge, United Kingdom</p>
//!     <p class="c-article-author-affiliation__authors-list">Jane Doe &amp; John Smith</p>
//!   </li>
//! </ol>
//! ```
//!
//! The country is the last comma-separated segment of the address. An author
//! listed under several addresses is counted once, under the first country
//! they appear with.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::fetch::fetch_html;
use crate::models::{ArticleReport, AuthorAffiliation, CountryTally};
use crate::utils::{country_from_address, normalize_country, split_authors, truncate_for_log};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("time"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".c-article-title"));
static AFFILIATION_LIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector(".c-article-author-affiliation__list"));
static AFFILIATION_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("li"));
static ADDRESS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector(".c-article-author-affiliation__address"));
static AUTHORS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector(".c-article-author-affiliation__authors-list"));

/// Fetch one article and parse it.
///
/// Takes owned arguments so it can be spawned onto the runtime directly.
#[instrument(level = "info", skip(client))]
pub async fn fetch_article(client: Client, url: String) -> Result<ArticleReport> {
    let html = fetch_html(&client, &url).await?;
    let report = parse_article(&url, &html).inspect_err(|e| {
        warn!(error = %e, body = %truncate_for_log(&html, 300), "Article page did not parse");
    })?;

    debug!(
        authors = report.authors.len(),
        countries = report.tally.len(),
        "Parsed article"
    );
    Ok(report)
}

/// Parse an article page fetched from `url`.
pub fn parse_article(url: &str, html: &str) -> Result<ArticleReport> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let date = non_empty_text(root, &DATE_SELECTOR)
        .ok_or_else(|| Error::parse(format!("{url}: missing publication date")))?;
    let title = non_empty_text(root, &TITLE_SELECTOR)
        .ok_or_else(|| Error::parse(format!("{url}: missing article title")))?;
    let list = root
        .select(&AFFILIATION_LIST_SELECTOR)
        .next()
        .ok_or_else(|| Error::parse(format!("{url}: missing author affiliation list")))?;

    let mut author_map: BTreeMap<String, AuthorAffiliation> = BTreeMap::new();
    let mut items = 0usize;

    for item in list.select(&AFFILIATION_ITEM_SELECTOR) {
        items += 1;

        let address = text(item, &ADDRESS_SELECTOR)
            .ok_or_else(|| Error::parse(format!("{url}: affiliation {items} has no address")))?;
        let country = normalize_country(country_from_address(&address)?);
        let authors = text(item, &AUTHORS_SELECTOR)
            .ok_or_else(|| Error::parse(format!("{url}: affiliation {items} has no authors")))?;

        for name in split_authors(&authors) {
            author_map
                .entry(name)
                .or_insert_with_key(|name| AuthorAffiliation::new(name.as_str()))
                .register(&country);
        }
    }

    if items == 0 {
        return Err(Error::parse(format!("{url}: author affiliation list is empty")));
    }

    let authors: Vec<AuthorAffiliation> = author_map.into_values().collect();
    let tally = tally_primary_countries(&authors);

    Ok(ArticleReport {
        date,
        title,
        url: url.to_string(),
        authors,
        tally,
    })
}

/// Count every author once, under their first registered country.
pub fn tally_primary_countries(authors: &[AuthorAffiliation]) -> CountryTally {
    let mut tally = CountryTally::new();
    for country in authors.iter().filter_map(AuthorAffiliation::primary_country) {
        tally.increment(country);
    }
    tally
}

fn text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

fn non_empty_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    text(scope, selector)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
