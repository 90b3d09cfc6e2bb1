//! Scrapers for the publisher's index and article pages.
//!
//! Scraping is two-phase:
//!
//! 1. **Indexing** ([`index`]): discover article URLs from the yearly listing
//!    and order them by publication date
//! 2. **Fetching** ([`article`]): download each article page and extract its
//!    affiliation data
//!
//! Both phases rely on fixed CSS selectors. A page that does not match them
//! is a parse error, never a silent skip.

pub mod article;
pub mod index;
