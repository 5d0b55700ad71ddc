// src/models/mod.rs

//! Domain models for the gallery retriever.

mod gallery;

// Re-export all public types
pub use gallery::{Gallery, UrlKind};
