//! The render model handed to the template engine.
//!
//! These types are serialized straight into the template context, so field
//! names are part of the theme contract: a theme's `index.html` sees
//! `version`, `sitename`, `thumbnail_size`, and `collections`.

use serde::Serialize;

/// Everything `index.html` is rendered from.
///
/// Exists for the duration of one render call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Generator version, e.g. `"0.9.0"`.
    pub version: String,
    /// Site title from config.
    pub sitename: String,
    /// Thumbnail `(width, height)`; templates see it as a two-element list.
    pub thumbnail_size: (u32, u32),
    /// Collections sorted by name.
    pub collections: Vec<Collection>,
}

/// One collection (input subdirectory) rendered as one gallery section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub name: String,
    /// Photos sorted by origin path.
    pub photos: Vec<Photo>,
}

/// A single photo as the page links to it.
///
/// Both paths are relative to the output root and use forward slashes, so a
/// template can drop them into `src`/`href` attributes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    /// `<gallery>/<collection>/<file>`
    pub origin: String,
    /// `<gallery>/<collection>/thumbnails/<file>`
    pub thumbnail: String,
    /// Never empty; falls back to the configured default.
    pub description: String,
    /// `description` is the configured default rather than embedded text.
    #[serde(skip)]
    pub default_description: bool,
}
