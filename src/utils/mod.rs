//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

/// Extract the scheme+host prefix of a URL, e.g. `https://www.example.com`.
pub fn base_url(url_str: &str) -> Result<String> {
    let parsed = Url::parse(url_str)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::scrape(url_str, "URL has no host"))?;
    match parsed.port() {
        Some(port) => Ok(format!("{}://{}:{}", parsed.scheme(), host, port)),
        None => Ok(format!("{}://{}", parsed.scheme(), host)),
    }
}
