// src/services/walker.rs

//! Pagination walker.
//!
//! Walks the gallery listing page chain, accumulating photo-page URLs in
//! document order. The recursion of the original flow is flattened into a
//! loop with a growable accumulator so deep chains cannot exhaust the stack.

use scraper::Html;

use crate::error::Result;
use crate::services::site::{SiteAdapter, parse_selector};
use crate::utils::http;

/// Collect photo-page links from a single listing page.
///
/// An anchor qualifies when it wraps an image element and its target starts
/// with the photo href prefix. Targets are absolutized by prefixing the
/// base URL, preserving document order.
pub fn photo_page_links(site: &SiteAdapter, doc: &Html, base_url: &str) -> Result<Vec<String>> {
    let anchor_sel = parse_selector("a:has(img)")?;
    let prefix = &site.rules().photo_href_prefix;

    let links = doc
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with(prefix.as_str()))
        .map(|href| format!("{base_url}{href}"))
        .collect();
    Ok(links)
}

/// Find the href of the pagination "next" control, if any.
///
/// The anchor text must equal the next marker exactly.
pub fn next_page_href(site: &SiteAdapter, doc: &Html) -> Result<Option<String>> {
    let anchor_sel = parse_selector("a")?;
    let marker = &site.rules().next_marker;

    let href = doc
        .select(&anchor_sel)
        .find(|a| a.text().collect::<String>() == *marker)
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);
    Ok(href)
}

/// Build the URL of the next listing page.
///
/// The next control's target is concatenated onto the *original* listing
/// URL, never onto the page it was found on: the site's pagination hrefs
/// are suffixes of the listing URL, not of intermediate pages.
pub fn next_page_url(listing_url: &str, href: &str) -> String {
    format!("{listing_url}{href}")
}

/// Walk the listing chain starting at `listing_url`, returning every
/// photo-page URL across all pages, in page order then in-page order.
///
/// There is no cycle detection: a self-referential next link loops forever.
pub async fn collect_image_pages(
    client: &reqwest::Client,
    site: &SiteAdapter,
    base_url: &str,
    listing_url: &str,
) -> Result<Vec<String>> {
    let mut pages = Vec::new();
    let mut page_url = listing_url.to_string();

    loop {
        let next = {
            let doc = http::fetch_page(client, &page_url).await?;
            pages.extend(photo_page_links(site, &doc, base_url)?);
            next_page_href(site, &doc)?
        };

        match next {
            Some(href) => page_url = next_page_url(listing_url, &href),
            None => break,
        }
    }

    Ok(pages)
}
