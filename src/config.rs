// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Site-specific matching rules
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::config("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::config("client.timeout_secs must be > 0"));
        }
        if self.site.gallery_url_pattern.trim().is_empty() {
            return Err(AppError::config("site.gallery_url_pattern is empty"));
        }
        if self.site.photo_url_pattern.trim().is_empty() {
            return Err(AppError::config("site.photo_url_pattern is empty"));
        }
        if self.site.photo_href_prefix.trim().is_empty() {
            return Err(AppError::config("site.photo_href_prefix is empty"));
        }
        if self.site.fallback_gallery_name.trim().is_empty() {
            return Err(AppError::config("site.fallback_gallery_name is empty"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Site-coupled matching rules.
///
/// These are the fragile, host-specific patterns the retriever matches
/// against. Keeping them here lets the patterns be swapped via config
/// without touching the walking or downloading logic.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Regex a gallery listing URL must match
    #[serde(default = "defaults::gallery_url_pattern")]
    pub gallery_url_pattern: String,

    /// Regex a single-photo URL must match
    #[serde(default = "defaults::photo_url_pattern")]
    pub photo_url_pattern: String,

    /// Substring identifying the gallery listing link on a photo page
    #[serde(default = "defaults::gallery_link_marker")]
    pub gallery_link_marker: String,

    /// Literal marker in the table cell holding the gallery name
    #[serde(default = "defaults::name_marker")]
    pub name_marker: String,

    /// Prefix a photo-page href must start with
    #[serde(default = "defaults::photo_href_prefix")]
    pub photo_href_prefix: String,

    /// Exact anchor text of the pagination "next" control
    #[serde(default = "defaults::next_marker")]
    pub next_marker: String,

    /// Marker splitting the photo page title into name and suffix
    #[serde(default = "defaults::title_marker")]
    pub title_marker: String,

    /// Substring identifying the full-resolution image source
    #[serde(default = "defaults::full_image_marker")]
    pub full_image_marker: String,

    /// Directory name used when no gallery name can be parsed
    #[serde(default = "defaults::fallback_gallery_name")]
    pub fallback_gallery_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            gallery_url_pattern: defaults::gallery_url_pattern(),
            photo_url_pattern: defaults::photo_url_pattern(),
            gallery_link_marker: defaults::gallery_link_marker(),
            name_marker: defaults::name_marker(),
            photo_href_prefix: defaults::photo_href_prefix(),
            next_marker: defaults::next_marker(),
            title_marker: defaults::title_marker(),
            full_image_marker: defaults::full_image_marker(),
            fallback_gallery_name: defaults::fallback_gallery_name(),
        }
    }
}

mod defaults {
    // Client defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; galfetch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Site defaults
    pub fn gallery_url_pattern() -> String {
        r"^https://www\.image.+pictures/\d+/.+".into()
    }
    pub fn photo_url_pattern() -> String {
        r"^https://www\.image.+photo/\d+".into()
    }
    pub fn gallery_link_marker() -> String {
        "/gallery.php?".into()
    }
    pub fn name_marker() -> String {
        "Uploaded".into()
    }
    pub fn photo_href_prefix() -> String {
        "/photo".into()
    }
    pub fn next_marker() -> String {
        ":: next ::".into()
    }
    pub fn title_marker() -> String {
        "rn Pic ".into()
    }
    pub fn full_image_marker() -> String {
        "/images/full".into()
    }
    pub fn fallback_gallery_name() -> String {
        "untitled_gallery".into()
    }
}
