//! Error taxonomy for the scrape-and-report pipeline.
//!
//! Nothing in the crate recovers from these; every stage propagates them with
//! `?` and the first failure aborts the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request could not complete or the server answered with a non-2xx status.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The document did not have the structure the selectors expect.
    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// A per-article task panicked or was cancelled before yielding a result.
    #[error("article task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
