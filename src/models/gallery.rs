//! Gallery and URL classification types.

use std::fmt;
use std::path::PathBuf;

/// Shape of a user-supplied entry URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// A paginated gallery listing page
    Gallery,
    /// A page dedicated to a single photo
    Photo,
    /// Anything else
    Other,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrlKind::Gallery => "gallery",
            UrlKind::Photo => "photo",
            UrlKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// A resolved gallery: where it lives and where its images go.
#[derive(Debug, Clone)]
pub struct Gallery {
    /// Scheme+host prefix of the site, used to absolutize photo hrefs
    pub base_url: String,
    /// Parsed display name, None when the listing page yields nothing
    pub name: Option<String>,
    /// Output directory for downloaded images
    pub folder: PathBuf,
    /// Canonical listing URL the pagination walk starts from
    pub listing_url: String,
}

impl Gallery {
    /// Display name, falling back to the given default when unparsed.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}
