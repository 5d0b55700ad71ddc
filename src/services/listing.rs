// src/services/listing.rs

//! Gallery listing resolution: the canonical listing link and the display
//! name, both parsed from the first page fetched for the input URL.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::services::site::{SiteAdapter, parse_selector};

/// Extract the gallery listing href from a photo (or other) page.
///
/// Scans all anchors for the first whose target contains the gallery link
/// marker. A page without such an anchor is a hard failure: nothing can be
/// walked without the listing URL.
pub fn gallery_link(site: &SiteAdapter, doc: &Html, page_url: &str) -> Result<String> {
    let anchor_sel = parse_selector("a")?;
    let marker = &site.rules().gallery_link_marker;

    doc.select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.contains(marker.as_str()))
        .map(str::to_string)
        .ok_or_else(|| AppError::scrape(page_url, "gallery link not found"))
}

/// Derive the gallery display name from the first fetched page.
///
/// Looks for the first table cell whose text contains the name marker and
/// which holds no nested cell, then takes its first non-empty text line with
/// spaces replaced by underscores. Returns None when no cell matches or all
/// candidate lines are empty; callers fall back to a default folder name.
pub fn gallery_name(site: &SiteAdapter, doc: &Html) -> Result<Option<String>> {
    let td_sel = parse_selector("td")?;
    let marker = &site.rules().name_marker;

    for td in doc.select(&td_sel) {
        let text: String = td.text().collect();
        if !text.contains(marker.as_str()) || td.select(&td_sel).next().is_some() {
            continue;
        }

        let name = text
            .split('\n')
            .find(|line| !line.is_empty())
            .map(|line| line.replace(' ', "_"));
        return Ok(name.filter(|n| !n.is_empty()));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn site() -> SiteAdapter {
        SiteAdapter::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_gallery_link_first_match() {
        let doc = Html::parse_document(
            r#"<html><body>
            <a href="/home">home</a>
            <a href="/gallery.php?gid=42">gallery</a>
            <a href="/gallery.php?gid=43">another</a>
            </body></html>"#,
        );
        let href = gallery_link(&site(), &doc, "https://www.imagehost.test/photo/1").unwrap();
        assert_eq!(href, "/gallery.php?gid=42");
    }

    #[test]
    fn test_gallery_link_missing_is_fatal() {
        let doc = Html::parse_document(r#"<html><body><a href="/home">home</a></body></html>"#);
        let err = gallery_link(&site(), &doc, "https://www.imagehost.test/photo/1").unwrap_err();
        assert!(err.to_string().contains("gallery link not found"));
    }

    #[test]
    fn test_gallery_name_basic() {
        let doc = Html::parse_document(
            "<html><body><table><tr><td>Summer in Oslo\nUploaded by someone</td></tr></table></body></html>",
        );
        assert_eq!(
            gallery_name(&site(), &doc).unwrap(),
            Some("Summer_in_Oslo".to_string())
        );
    }

    #[test]
    fn test_gallery_name_skips_cells_with_nested_cells() {
        // The outer td wraps a table; only the inner, leaf td qualifies.
        let doc = Html::parse_document(
            "<html><body><table><tr><td>\
             <table><tr><td>Inner Name\nUploaded today</td></tr></table>\
             Uploaded outer</td></tr></table></body></html>",
        );
        assert_eq!(
            gallery_name(&site(), &doc).unwrap(),
            Some("Inner_Name".to_string())
        );
    }

    #[test]
    fn test_gallery_name_missing_marker() {
        let doc = Html::parse_document(
            "<html><body><table><tr><td>No marker here</td></tr></table></body></html>",
        );
        assert_eq!(gallery_name(&site(), &doc).unwrap(), None);
    }

    #[test]
    fn test_gallery_name_no_tables() {
        let doc = Html::parse_document("<html><body><p>Uploaded</p></body></html>");
        assert_eq!(gallery_name(&site(), &doc).unwrap(), None);
    }
}
