//! HTTP fetching.
//!
//! One shared [`reqwest::Client`] is built per run and cloned into each
//! article task. Requests are made once; a transport failure or a non-2xx
//! status is returned as [`Error::Network`](crate::error::Error::Network).

use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::Result;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// GET `url` and return the response body as text.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}
