// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use scraper::Html;

use crate::config::ClientConfig;
use crate::error::Result;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and parse it as HTML.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Html> {
    let text = client.get(url).send().await?.text().await?;
    Ok(Html::parse_document(&text))
}

/// Fetch a URL and return the raw response body.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let bytes = client.get(url).send().await?.bytes().await?;
    Ok(bytes.to_vec())
}
