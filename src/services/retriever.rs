// src/services/retriever.rs

//! Gallery retrieval orchestration.

use std::path::{Path, PathBuf};

use scraper::Html;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Gallery, UrlKind};
use crate::services::site::SiteAdapter;
use crate::services::{images, listing, walker};
use crate::utils::{self, http};

/// Resolve the canonical listing URL from the already-fetched input page.
///
/// A gallery URL is its own listing; photo and unrecognized URLs take the
/// in-page gallery link instead. Either way the input page is fetched once
/// and no further request is needed before the pagination walk.
fn resolve_listing_url(site: &SiteAdapter, kind: UrlKind, doc: &Html, url: &str) -> Result<String> {
    match kind {
        UrlKind::Gallery => Ok(url.to_string()),
        UrlKind::Photo | UrlKind::Other => {
            let href = listing::gallery_link(site, doc, url)?;
            Ok(utils::resolve(url, &href).unwrap_or(href))
        }
    }
}

/// Output directory for a gallery, falling back when no name was parsed.
fn gallery_folder(output_root: &Path, name: Option<&str>, fallback: &str) -> PathBuf {
    output_root.join(name.unwrap_or(fallback))
}

/// Session-scoped retriever: one instance per invocation.
pub struct GalleryRetriever {
    site: SiteAdapter,
    client: reqwest::Client,
    gallery: Gallery,
    image_urls: Vec<String>,
}

impl GalleryRetriever {
    /// Resolve the gallery behind `url` and collect all of its photo-page
    /// URLs.
    ///
    /// Fetches the input page exactly once. For a gallery URL the listing is
    /// the input itself; for a photo (or unrecognized) URL the listing link
    /// is taken from that single fetch before the pagination walk starts.
    pub async fn discover(
        config: &Config,
        client: reqwest::Client,
        url: &str,
        output_root: &Path,
    ) -> Result<Self> {
        let site = SiteAdapter::new(&config.site)?;

        let kind = site.classify(url);
        let base_url = utils::base_url(url)?;

        let (name, listing_url) = {
            let doc = http::fetch_page(&client, url).await?;
            let name = listing::gallery_name(&site, &doc)?;
            let listing_url = resolve_listing_url(&site, kind, &doc, url)?;
            (name, listing_url)
        };

        let folder = gallery_folder(
            output_root,
            name.as_deref(),
            &config.site.fallback_gallery_name,
        );
        let gallery = Gallery {
            base_url,
            name,
            folder,
            listing_url,
        };

        log::info!("URL type: {kind}");
        log::info!("Base URL: {}", gallery.base_url);
        log::info!(
            "Gallery name: {}",
            gallery.display_name(&config.site.fallback_gallery_name)
        );
        log::info!("Gallery URL: {}", gallery.listing_url);

        let image_urls =
            walker::collect_image_pages(&client, &site, &gallery.base_url, &gallery.listing_url)
                .await?;
        log::info!("Number of images found in the gallery: {}", image_urls.len());

        // Matches the source behavior: a failed mkdir is logged but does not
        // abort, even though later writes will then fail.
        match std::fs::create_dir_all(&gallery.folder) {
            Ok(()) => log::info!("Created directory {}", gallery.folder.display()),
            Err(e) => log::error!(
                "Creation of the directory {} failed: {e}",
                gallery.folder.display()
            ),
        }

        Ok(Self {
            site,
            client,
            gallery,
            image_urls,
        })
    }

    /// Download all collected images into the gallery folder.
    pub async fn save_images(&self) -> Result<()> {
        images::save_all(&self.client, &self.site, &self.gallery, &self.image_urls).await
    }

    /// Photo-page URLs collected during discovery, in walk order.
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// The resolved gallery.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn site() -> SiteAdapter {
        SiteAdapter::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_gallery_url_is_its_own_listing() {
        // Even when a gallery link is present on the page, a gallery URL
        // must be used as-is.
        let doc = Html::parse_document(
            r#"<html><body><a href="/gallery.php?gid=99">elsewhere</a></body></html>"#,
        );
        let url = "https://www.imagehost.test/pictures/123456/cats-by-the-sea";
        let listing = resolve_listing_url(&site(), UrlKind::Gallery, &doc, url).unwrap();
        assert_eq!(listing, url);
    }

    #[test]
    fn test_photo_url_takes_in_page_gallery_link() {
        let doc = Html::parse_document(
            r#"<html><body>
            <a href="/home">home</a>
            <a href="/gallery.php?gid=42">gallery</a>
            </body></html>"#,
        );
        let url = "https://www.imagehost.test/photo/987654";
        let listing = resolve_listing_url(&site(), UrlKind::Photo, &doc, url).unwrap();
        assert_eq!(listing, "https://www.imagehost.test/gallery.php?gid=42");
    }

    #[test]
    fn test_other_url_without_gallery_link_is_fatal() {
        let doc = Html::parse_document(r#"<html><body><a href="/home">home</a></body></html>"#);
        let url = "https://www.imagehost.test/index.html";
        assert!(resolve_listing_url(&site(), UrlKind::Other, &doc, url).is_err());
    }

    #[test]
    fn test_gallery_folder_uses_parsed_name() {
        let folder = gallery_folder(Path::new("out"), Some("Summer_in_Oslo"), "untitled_gallery");
        assert_eq!(folder, Path::new("out").join("Summer_in_Oslo"));
    }

    #[test]
    fn test_gallery_folder_falls_back_when_unnamed() {
        let folder = gallery_folder(Path::new("out"), None, "untitled_gallery");
        assert_eq!(folder, Path::new("out").join("untitled_gallery"));
    }
}
