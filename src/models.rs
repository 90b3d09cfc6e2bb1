//! Data models for index entries, parsed articles and country tallies.
//!
//! - [`ArticleRef`]: one entry discovered on the index page
//! - [`AuthorAffiliation`]: an author and the countries they are affiliated with
//! - [`CountryTally`]: country name to author count
//! - [`ArticleReport`]: everything extracted from one article page
//! - [`Report`]: all article reports of a run plus the global tally
//!
//! Everything here lives for a single run only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An article entry discovered on the index page.
///
/// `published` is the raw `datetime` attribute. It is ISO 8601, so ordering
/// the strings orders the entries chronologically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub published: String,
    pub url: String,
}

/// One author and the countries listed for them, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorAffiliation {
    pub name: String,
    pub countries: Vec<String>,
}

impl AuthorAffiliation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            countries: Vec::new(),
        }
    }

    /// Record a country for this author. Repeats are ignored so the first
    /// registration keeps its position.
    pub fn register(&mut self, country: &str) {
        if !self.countries.iter().any(|c| c == country) {
            self.countries.push(country.to_string());
        }
    }

    /// The country the author is counted under.
    pub fn primary_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }
}

/// Mapping from country name to number of authors, iterated alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CountryTally(BTreeMap<String, usize>);

impl CountryTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, country: &str) {
        self.add(country, 1);
    }

    pub fn add(&mut self, country: &str, count: usize) {
        *self.0.entry(country.to_string()).or_insert(0) += count;
    }

    /// Element-wise sum of `other` into `self`.
    pub fn merge(&mut self, other: &CountryTally) {
        for (country, count) in other.iter() {
            self.add(country, count);
        }
    }

    pub fn get(&self, country: &str) -> usize {
        self.0.get(country).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(country, count)| (country.as_str(), *count))
    }
}

/// Everything extracted from a single article page.
///
/// `authors` is sorted by name and `tally` holds one count per author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleReport {
    pub date: String,
    pub title: String,
    pub url: String,
    pub authors: Vec<AuthorAffiliation>,
    pub tally: CountryTally,
}

/// The result of a full run, in publication order.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Report {
    pub articles: Vec<ArticleReport>,
    pub totals: CountryTally,
}

impl Report {
    /// Append an article and fold its tally into the totals.
    pub fn push(&mut self, article: ArticleReport) {
        self.totals.merge(&article.tally);
        self.articles.push(article);
    }
}
