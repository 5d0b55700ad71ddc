//! Service layer for the gallery retriever.
//!
//! This module contains the business logic for:
//! - URL classification and site rules (`SiteAdapter`)
//! - Listing link and name resolution (`listing`)
//! - Pagination walking (`walker`)
//! - Image downloading (`images`)
//! - Overall orchestration (`GalleryRetriever`)

pub mod images;
pub mod listing;
mod retriever;
pub mod site;
pub mod walker;

pub use retriever::GalleryRetriever;
pub use site::SiteAdapter;
