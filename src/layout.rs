//! Output tree layout.
//!
//! ```text
//! output/
//! ├── index.html
//! ├── static/                      # copied from themes/<theme>/static
//! └── gallery/                     # gallery base (name of the input root)
//!     ├── alps/
//!     │   ├── 001.jpg              # original, byte-for-byte
//!     │   └── thumbnails/
//!     │       └── 001.jpg          # cropped-to-fill JPEG
//!     └── beach/
//!         └── ...
//! ```
//!
//! Photos are addressed by their *origin*: the web-relative path
//! `<gallery>/<collection>/<file>`. Every on-disk output location is the
//! origin rebased under the output root, and the thumbnail origin is the
//! origin with a `thumbnails` segment inserted before the filename.

use crate::config::{self, ConfigError, GalleryConfig};
use std::path::{Path, PathBuf};

/// Name of the per-collection thumbnail directory.
pub const THUMBNAILS_DIR: &str = "thumbnails";
/// Rendered page, relative to the output root.
pub const INDEX_PAGE: &str = "index.html";
/// Static asset directory, relative to the output root.
pub const STATIC_DIR: &str = "static";

/// Resolved output paths for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_root: PathBuf,
    gallery_dir: String,
}

impl OutputLayout {
    pub fn new(output_root: impl Into<PathBuf>, gallery_dir: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            gallery_dir: gallery_dir.into(),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Result<Self, ConfigError> {
        let gallery_dir = config::gallery_dir_name(&config.gallery_path).ok_or_else(|| {
            ConfigError::Validation(format!(
                "gallery_path '{}' must end in a named directory",
                config.gallery_path.display()
            ))
        })?;
        Ok(Self::new(&config.output_path, gallery_dir))
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn gallery_base(&self) -> PathBuf {
        self.output_root.join(&self.gallery_dir)
    }

    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.gallery_base().join(collection)
    }

    pub fn thumbnails_dir(&self, collection: &str) -> PathBuf {
        self.collection_dir(collection).join(THUMBNAILS_DIR)
    }

    pub fn index_page(&self) -> PathBuf {
        self.output_root.join(INDEX_PAGE)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.output_root.join(STATIC_DIR)
    }

    /// Web-relative origin of a photo.
    pub fn origin(&self, collection: &str, file_name: &str) -> String {
        format!("{}/{}/{}", self.gallery_dir, collection, file_name)
    }

    /// Map a web-relative path onto the output tree.
    pub fn rebase(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.output_root.clone(), |path, segment| path.join(segment))
    }
}

/// Insert a `thumbnails` segment immediately before the filename.
///
/// ```
/// # use photo_gallery::layout::thumbnail_path;
/// assert_eq!(thumbnail_path("gallery/beach/a.jpg"), "gallery/beach/thumbnails/a.jpg");
/// assert_eq!(thumbnail_path("a.jpg"), "thumbnails/a.jpg");
/// ```
pub fn thumbnail_path(origin: &str) -> String {
    match origin.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/{THUMBNAILS_DIR}/{file}"),
        None => format!("{THUMBNAILS_DIR}/{origin}"),
    }
}
