//! Run driver: index, fan out, collect in order, report.
//!
//! Article pages are fetched by spawned tasks, at most `jobs` at a time.
//! Results are taken back in submission order (oldest article first) no
//! matter which task finishes first, so the report is the same on every run.
//! The first failed article ends the run before the totals are written.

use std::future::Future;
use std::io::Write;
use std::pin::pin;
use std::time::Instant;

use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument};

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::fetch::build_client;
use crate::models::{ArticleRef, ArticleReport, Report};
use crate::outputs::{json, text};
use crate::scrapers::{article::fetch_article, index::index_articles};

/// Fetch and parse every article, yielding reports in the order given.
///
/// Each article runs as its own task on the runtime's worker threads. No more
/// than `jobs` tasks are in flight at once.
pub fn fetch_articles(
    client: Client,
    articles: Vec<ArticleRef>,
    jobs: usize,
) -> impl Stream<Item = Result<ArticleReport>> {
    spawn_ordered(
        articles
            .into_iter()
            .map(move |article| fetch_article(client.clone(), article.url)),
        jobs,
    )
}

/// Aborts the task when dropped; a no-op once the task has finished.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Spawn `tasks` lazily, keeping at most `jobs` running, and yield their
/// results in iteration order.
///
/// Dropping the stream aborts every task still in flight, so nothing
/// outlives a run that stopped on an earlier failure.
pub fn spawn_ordered<I, F, T>(tasks: I, jobs: usize) -> impl Stream<Item = Result<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    stream::iter(tasks)
        .map(|task| {
            let handle = tokio::spawn(task);
            let guard = AbortOnDrop(handle.abort_handle());
            async move {
                let result = handle.await;
                drop(guard);
                result?
            }
        })
        .buffered(jobs.max(1))
}

/// Run the whole scrape and write the report to `out`.
///
/// In text mode each article block is written as soon as it is next in line.
/// The global tally is only folded on this task.
#[instrument(level = "info", skip_all, fields(base_url = %config.base_url, year = config.year, jobs = config.jobs))]
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<Report> {
    let started = Instant::now();
    let client = build_client()?;

    let articles = index_articles(&client, &config.index_url()?, &config.base()?).await?;
    let total = articles.len();
    info!(total, "Fetching articles");

    let mut results = pin!(fetch_articles(client, articles, config.jobs));
    let mut report = Report::default();

    while let Some(result) = results.next().await {
        let article = result?;
        debug!(index = report.articles.len(), url = %article.url, "Article ready");

        if config.format == OutputFormat::Text {
            text::write_article(out, &article)?;
        }
        report.push(article);
    }

    match config.format {
        OutputFormat::Text => text::write_totals(out, &report.totals)?,
        OutputFormat::Json => json::write_report(out, &report)?,
    }
    out.flush()?;

    info!(
        articles = report.articles.len(),
        authors = report.totals.total(),
        countries = report.totals.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Report complete"
    );
    Ok(report)
}
