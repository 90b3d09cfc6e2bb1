//! Report writers.
//!
//! - [`text`]: per-article blocks written as each article is retrieved, then
//!   the totals
//! - [`json`]: one document for the whole run

pub mod json;
pub mod text;
