use std::time::{Duration, Instant};

use httpmock::prelude::*;
use paperstats::models::CountryTally;
use paperstats::{Config, Error, OutputFormat};

fn index_page(entries: &[(&str, &str)]) -> String {
    let articles: String = entries
        .iter()
        .map(|(datetime, href)| {
            format!(
                r#"<article class="u-full-height c-card">
                     <div class="c-card__body">
                       <h3 class="c-card__title">
                         <a href="{href}" class="c-card__link" data-track-action="view article">Primer</a>
                       </h3>
                     </div>
                     <div class="c-card__section c-meta">
                       <time class="c-meta__item" datetime="{datetime}">{datetime}</time>
                     </div>
                   </article>"#
            )
        })
        .collect();
    format!("<html><body><section>{articles}</section></body></html>")
}

fn article_page(date: &str, title: &str, affiliations: &[(&str, &str)]) -> String {
    let items: String = affiliations
        .iter()
        .map(|(address, authors)| {
            format!(
                r#"<li>
                     <p class="c-article-author-affiliation__address">{address}</p>
                     <p class="c-article-author-affiliation__authors-list">{authors}</p>
                   </li>"#
            )
        })
        .collect();
    format!(
        r##"<html><body>
             <ul class="c-article-identifiers"><li><a href="#article-info"><time datetime="x">{date}</time></a></li></ul>
             <h1 class="c-article-title">{title}</h1>
             <ol class="c-article-author-affiliation__list">{items}</ol>
           </body></html>"##
    )
}

fn config(server: &MockServer, jobs: usize, format: OutputFormat) -> Config {
    Config {
        base_url: server.base_url(),
        year: 2020,
        jobs,
        format,
    }
}

/// Index lists the newer article first; the older one links a shared
/// UK affiliation and the newer one a Dutch address.
async fn two_article_site(server: &MockServer) {
    two_article_site_with_delays(server, 0, 0).await;
}

async fn two_article_site_with_delays(server: &MockServer, older_ms: u64, newer_ms: u64) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/nrdp/articles")
                .query_param("type", "primer")
                .query_param("year", "2020");
            then.status(200)
                .header("content-type", "text/html")
                .body(index_page(&[
                    ("2020-01-02", "/articles/newer"),
                    ("2020-01-01", "/articles/older"),
                ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/older");
            then.status(200)
                .delay(Duration::from_millis(older_ms))
                .body(article_page(
                    "01 January 2020",
                    "Older primer",
                    &[(
                        "Jane Doe, John Smith, Cambridge, United Kingdom",
                        "Jane Doe &amp; John Smith",
                    )],
                ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/newer");
            then.status(200)
                .delay(Duration::from_millis(newer_ms))
                .body(article_page(
                    "02 January 2020",
                    "Newer primer",
                    &[
                        ("Amsterdam UMC, Amsterdam, Netherlands", "Piet Jansen, Jane Doe"),
                        ("University of Oxford, Oxford, United Kingdom", "Piet Jansen"),
                    ],
                ));
        })
        .await;
}

#[tokio::test]
async fn test_text_report_in_publication_order() {
    let server = MockServer::start_async().await;
    two_article_site(&server).await;

    let mut out = Vec::new();
    let report = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let older = text.find("Older primer").unwrap();
    let newer = text.find("Newer primer").unwrap();
    let totals = text.find("-- TOTAL --").unwrap();
    assert!(older < newer);
    assert!(newer < totals);

    assert_eq!(report.articles[0].title, "Older primer");
    assert_eq!(report.articles[0].tally.get("United Kingdom"), 2);
    assert_eq!(report.articles[1].tally.get("The Netherlands"), 2);
    assert_eq!(report.articles[1].tally.get("United Kingdom"), 0);

    let older_url = format!("{}/articles/older", server.base_url());
    let expected_older = format!(
        concat!(
            "01 January 2020\n",
            "  Older primer - {}\n",
            "\n",
            "\tJane Doe                      \tUnited Kingdom\n",
            "\tJohn Smith                    \tUnited Kingdom\n",
            "\n",
            "\tUnited Kingdom      \t2\n",
            "\n",
            "\n",
        ),
        older_url
    );
    assert!(text.starts_with(&expected_older));

    assert!(text.contains("\tPiet Jansen                   \tThe Netherlands, United Kingdom\n"));
    assert!(text.ends_with(concat!(
        "\n\n-- TOTAL --\n\n\n",
        "\tTHE NETHERLANDS     \t2\n",
        "\tUNITED KINGDOM      \t2\n",
    )));
}

#[tokio::test]
async fn test_totals_are_sum_of_article_tallies() {
    let server = MockServer::start_async().await;
    two_article_site(&server).await;

    let mut out = Vec::new();
    let report = paperstats::run(&config(&server, 2, OutputFormat::Text), &mut out)
        .await
        .unwrap();

    let mut expected = CountryTally::new();
    for article in &report.articles {
        expected.merge(&article.tally);
        assert_eq!(article.tally.total(), article.authors.len());
    }
    assert_eq!(report.totals, expected);
}

#[tokio::test]
async fn test_output_independent_of_worker_count() {
    let server = MockServer::start_async().await;
    two_article_site(&server).await;

    let mut serial = Vec::new();
    paperstats::run(&config(&server, 1, OutputFormat::Text), &mut serial)
        .await
        .unwrap();
    let mut parallel = Vec::new();
    paperstats::run(&config(&server, 16, OutputFormat::Text), &mut parallel)
        .await
        .unwrap();

    assert_eq!(serial, parallel);
}

#[tokio::test]
async fn test_slow_older_article_still_printed_first() {
    let reference_server = MockServer::start_async().await;
    two_article_site(&reference_server).await;
    let mut reference = Vec::new();
    let expected = paperstats::run(&config(&reference_server, 1, OutputFormat::Text), &mut reference)
        .await
        .unwrap();

    let server = MockServer::start_async().await;
    two_article_site_with_delays(&server, 500, 0).await;

    let mut out = Vec::new();
    let report = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let older = text.find("Older primer").unwrap();
    let newer = text.find("Newer primer").unwrap();
    assert!(older < newer);
    assert_eq!(report.articles[0].title, "Older primer");
    assert_eq!(report.totals, expected.totals);

    let totals = &text[text.find("-- TOTAL --").unwrap()..];
    let reference = String::from_utf8(reference).unwrap();
    assert_eq!(totals, &reference[reference.find("-- TOTAL --").unwrap()..]);
}

#[tokio::test]
async fn test_single_job_fetches_articles_one_at_a_time() {
    let server = MockServer::start_async().await;
    two_article_site_with_delays(&server, 300, 300).await;

    let started = Instant::now();
    let mut out = Vec::new();
    let report = paperstats::run(&config(&server, 1, OutputFormat::Text), &mut out)
        .await
        .unwrap();

    assert_eq!(report.articles.len(), 2);
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test]
async fn test_json_report() {
    let server = MockServer::start_async().await;
    two_article_site(&server).await;

    let mut out = Vec::new();
    paperstats::run(&config(&server, 4, OutputFormat::Json), &mut out)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["articles"][0]["title"], "Older primer");
    assert_eq!(value["articles"][1]["title"], "Newer primer");
    assert_eq!(value["totals"]["The Netherlands"], 2);
    assert_eq!(value["totals"]["United Kingdom"], 2);
}

#[tokio::test]
async fn test_missing_affiliation_list_aborts_before_totals() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/nrdp/articles");
            then.status(200).body(index_page(&[
                ("2020-03-01", "/articles/broken"),
                ("2020-02-01", "/articles/fine"),
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/fine");
            then.status(200).body(article_page(
                "01 February 2020",
                "Fine primer",
                &[("Uni, Madrid, Spain", "Lucia Garcia")],
            ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/broken");
            then.status(200).body(
                r#"<html><body><time>01 March 2020</time><h1 class="c-article-title">Broken</h1></body></html>"#,
            );
        })
        .await;

    let mut out = Vec::new();
    let err = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap_err();
    let text = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(text.contains("Fine primer"));
    assert!(!text.contains("-- TOTAL --"));
}

#[tokio::test]
async fn test_index_http_error_is_network_error() {
    let server = MockServer::start_async().await;
    let index = server
        .mock_async(|when, then| {
            when.method(GET).path("/nrdp/articles");
            then.status(503);
        })
        .await;

    let mut out = Vec::new();
    let err = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap_err();

    index.assert_async().await;
    assert!(matches!(err, Error::Network(_)));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_article_http_error_is_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/nrdp/articles");
            then.status(200)
                .body(index_page(&[("2020-05-01", "/articles/gone")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/gone");
            then.status(404);
        })
        .await;

    let mut out = Vec::new();
    let err = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_empty_index_prints_only_totals() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/nrdp/articles");
            then.status(200).body(index_page(&[]));
        })
        .await;

    let mut out = Vec::new();
    let report = paperstats::run(&config(&server, 4, OutputFormat::Text), &mut out)
        .await
        .unwrap();

    assert!(report.articles.is_empty());
    assert_eq!(String::from_utf8(out).unwrap(), "\n\n-- TOTAL --\n\n\n");
}
