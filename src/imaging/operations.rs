//! High-level image operations.
//!
//! These functions turn configuration into parameters and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{Quality, ThumbnailParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailConfig {
    /// Exact output `(width, height)`.
    pub size: (u32, u32),
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: (256, 160),
            quality: Quality::default(),
        }
    }
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(source: &Path, output: &Path, config: &ThumbnailConfig) -> ThumbnailParams {
    let (width, height) = config.size;
    ThumbnailParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Create a thumbnail of `source` at `output`.
///
/// The source is resized to cover the target area, then center-cropped, so the
/// output always has exactly the configured dimensions.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ThumbnailConfig,
) -> Result<()> {
    backend.thumbnail(&plan_thumbnail(source, output, config))
}
