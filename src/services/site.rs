// src/services/site.rs

//! Site adapter: URL classification and the site-coupled matching rules.
//!
//! Everything host-specific lives behind this type so the walker and the
//! downloader never see a raw pattern string.

use regex::Regex;
use scraper::Selector;

use crate::config::SiteConfig;
use crate::error::{AppError, Result};
use crate::models::UrlKind;

/// Compiled site matching rules.
pub struct SiteAdapter {
    gallery_re: Regex,
    photo_re: Regex,
    rules: SiteConfig,
}

impl SiteAdapter {
    /// Compile the configured URL patterns.
    pub fn new(rules: &SiteConfig) -> Result<Self> {
        Ok(Self {
            gallery_re: Regex::new(&rules.gallery_url_pattern)?,
            photo_re: Regex::new(&rules.photo_url_pattern)?,
            rules: rules.clone(),
        })
    }

    /// Classify an absolute URL as gallery, photo or other.
    pub fn classify(&self, url: &str) -> UrlKind {
        if self.gallery_re.is_match(url) {
            UrlKind::Gallery
        } else if self.photo_re.is_match(url) {
            UrlKind::Photo
        } else {
            UrlKind::Other
        }
    }

    /// The raw marker rules this adapter was compiled from.
    pub fn rules(&self) -> &SiteConfig {
        &self.rules
    }
}

/// Parse a CSS selector, mapping failures to an application error.
pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn adapter() -> SiteAdapter {
        SiteAdapter::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_classify_gallery() {
        let site = adapter();
        assert_eq!(
            site.classify("https://www.imagehost.test/pictures/123456/cats-by-the-sea"),
            UrlKind::Gallery
        );
    }

    #[test]
    fn test_classify_photo() {
        let site = adapter();
        assert_eq!(
            site.classify("https://www.imagehost.test/photo/987654"),
            UrlKind::Photo
        );
    }

    #[test]
    fn test_classify_other() {
        let site = adapter();
        assert_eq!(
            site.classify("https://www.imagehost.test/index.html"),
            UrlKind::Other
        );
        assert_eq!(
            site.classify("https://elsewhere.test/pictures/1/x"),
            UrlKind::Other
        );
        // Digits are required in both shapes
        assert_eq!(
            site.classify("https://www.imagehost.test/pictures/abc/x"),
            UrlKind::Other
        );
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let mut rules = SiteConfig::default();
        rules.photo_url_pattern = "[unclosed".into();
        assert!(SiteAdapter::new(&rules).is_err());
    }

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("a:has(img)").is_ok());
        assert!(parse_selector("td").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }
}
