// src/services/images.rs

//! Image downloader.
//!
//! Fetches each photo page, extracts the full-resolution image source and a
//! title-derived file name, and writes the image bytes to the gallery folder.

use std::path::Path;

use scraper::Html;

use crate::error::Result;
use crate::models::Gallery;
use crate::services::site::{SiteAdapter, parse_selector};
use crate::utils::http;

/// Derive an image file name from a photo page title.
///
/// Takes the substring before the title marker (the whole title when the
/// marker is absent), then drops the last 3 characters. This reproduces the
/// site's title convention exactly and is not meant to generalize.
pub fn image_name_from_title(site: &SiteAdapter, title: &str) -> String {
    let marker = &site.rules().title_marker;
    let head = title
        .split_once(marker.as_str())
        .map_or(title, |(head, _)| head);

    let keep = head.chars().count().saturating_sub(3);
    head.chars().take(keep).collect()
}

/// Extract the full-resolution image URL from a photo page.
///
/// Returns the `src` of the first image whose source contains the full
/// image marker, or None when the page carries no such image.
pub fn full_image_url(site: &SiteAdapter, doc: &Html) -> Result<Option<String>> {
    let img_sel = parse_selector("img")?;
    let marker = &site.rules().full_image_marker;

    let src = doc
        .select(&img_sel)
        .filter_map(|img| img.value().attr("src"))
        .find(|src| src.contains(marker.as_str()))
        .map(str::to_string);
    Ok(src)
}

/// Write image bytes to `<folder>/<name>`, overwriting silently.
pub async fn write_image(folder: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(folder.join(name), bytes).await?;
    Ok(())
}

/// Download every photo page's image into the gallery folder, in list order.
///
/// A page without a full-resolution image is logged and skipped; any network
/// or filesystem failure aborts the run.
pub async fn save_all(
    client: &reqwest::Client,
    site: &SiteAdapter,
    gallery: &Gallery,
    image_urls: &[String],
) -> Result<()> {
    let title_sel = parse_selector("title")?;
    log::info!("Fetching images...");

    for page_url in image_urls {
        let (title, src) = {
            let doc = http::fetch_page(client, page_url).await?;
            let title = doc
                .select(&title_sel)
                .next()
                .map(|t| t.text().collect::<String>());
            (title, full_image_url(site, &doc)?)
        };

        let Some(title) = title else {
            log::warn!("No title on this page, skipping: {page_url}");
            continue;
        };
        let Some(src) = src else {
            log::warn!("Failed to find image url for this page: {page_url}");
            continue;
        };

        let name = image_name_from_title(site, &title);
        let bytes = http::fetch_bytes(client, &src).await?;
        write_image(&gallery.folder, &name, &bytes).await?;
        log::debug!("Saved {} ({} bytes)", name, bytes.len());
    }

    Ok(())
}
