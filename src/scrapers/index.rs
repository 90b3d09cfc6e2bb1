//! Index page scraper.
//!
//! The yearly listing at `/nrdp/articles?type=primer&year=<year>` has one
//! `<article>` per primer. Each carries a `<time datetime="...">` and a link
//! marked `data-track-action="view article"` with a site-relative `href`.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::fetch_html;
use crate::models::ArticleRef;

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static VIEW_ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-track-action="view article"]"#).unwrap());

/// Fetch the index page and return its articles oldest first.
#[instrument(level = "info", skip(client))]
pub async fn index_articles(client: &Client, index_url: &Url, base: &Url) -> Result<Vec<ArticleRef>> {
    let html = fetch_html(client, index_url.as_str()).await?;
    let articles = parse_index(&html, base)?;

    info!(count = articles.len(), source = %index_url, "Indexed article URLs");
    debug!(urls = ?articles.iter().map(|a| a.url.as_str()).collect::<Vec<_>>(), "Article URLs");

    Ok(articles)
}

/// Extract article entries from index HTML, sorted by ascending `datetime`.
///
/// Entries with equal timestamps keep their document order. An entry missing
/// its timestamp or its link is a [`Error::Parse`].
pub fn parse_index(html: &str, base: &Url) -> Result<Vec<ArticleRef>> {
    let document = Html::parse_document(html);

    let mut articles = Vec::new();
    for (position, entry) in document.select(&ARTICLE_SELECTOR).enumerate() {
        let published = entry
            .select(&TIME_SELECTOR)
            .next()
            .and_then(|time| time.value().attr("datetime"))
            .ok_or_else(|| Error::parse(format!("index entry {position} has no <time datetime>")))?;

        let href = entry
            .select(&VIEW_ARTICLE_SELECTOR)
            .next()
            .and_then(|link| link.value().attr("href"))
            .ok_or_else(|| Error::parse(format!("index entry {position} has no \"view article\" link")))?;

        articles.push(ArticleRef {
            published: published.to_string(),
            url: base.join(href)?.to_string(),
        });
    }

    articles.sort_by(|a, b| a.published.cmp(&b.published));
    Ok(articles)
}
