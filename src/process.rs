//! Thumbnail generation and original copying.
//!
//! For every photo of a collection two outputs are written under the output
//! root:
//!
//! ```text
//! output/gallery/beach/
//! ├── sunset.jpg              # byte-for-byte copy of the original
//! └── thumbnails/
//!     └── sunset.jpg          # cropped-to-fill JPEG at the configured size
//! ```
//!
//! Both locations derive from the photo's origin through [`OutputLayout`], so
//! the thumbnail always sits at the origin with a `thumbnails` segment
//! inserted before the filename.
//!
//! ## Parallel Processing
//!
//! Photos within a collection are independent and are processed in parallel
//! using [rayon](https://docs.rs/rayon). The first failure aborts the
//! collection; no rollback is attempted.

use crate::config::GalleryConfig;
use crate::imaging::{BackendError, ImageBackend, Quality, ThumbnailConfig, create_thumbnail};
use crate::layout::{OutputLayout, thumbnail_path};
use crate::scan::PhotoSource;
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to copy {source_path} to {dest}: {error}")]
    Copy {
        source_path: PathBuf,
        dest: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Configuration for image processing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProcessConfig {
    pub thumbnail: ThumbnailConfig,
}

impl ProcessConfig {
    pub fn from_gallery_config(config: &GalleryConfig) -> Self {
        Self {
            thumbnail: ThumbnailConfig {
                size: config.thumbnail_size(),
                quality: Quality::new(config.thumbnails.quality),
            },
        }
    }
}

/// Outcome of processing one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub name: String,
    pub photos: usize,
}

/// On-disk output locations of one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoOutputs {
    pub copy: PathBuf,
    pub thumbnail: PathBuf,
}

pub fn photo_outputs(layout: &OutputLayout, collection: &str, photo: &PhotoSource) -> PhotoOutputs {
    let origin = layout.origin(collection, &photo.file_name);
    PhotoOutputs {
        thumbnail: layout.rebase(&thumbnail_path(&origin)),
        copy: layout.rebase(&origin),
    }
}

fn check_source(photo: &PhotoSource) -> Result<(), ProcessError> {
    if photo.path.is_file() {
        Ok(())
    } else {
        Err(ProcessError::SourceNotFound(photo.path.clone()))
    }
}

/// Write a thumbnail for every photo of `collection`.
pub fn generate_thumbnails(
    backend: &impl ImageBackend,
    layout: &OutputLayout,
    collection: &str,
    photos: &[PhotoSource],
    config: &ProcessConfig,
) -> Result<(), ProcessError> {
    photos.par_iter().try_for_each(|photo| {
        check_source(photo)?;
        let outputs = photo_outputs(layout, collection, photo);
        tracing::debug!(photo = %photo.file_name, output = %outputs.thumbnail.display(), "thumbnail");
        create_thumbnail(backend, &photo.path, &outputs.thumbnail, &config.thumbnail)?;
        Ok(())
    })
}

/// Copy every original of `collection` into the output tree, overwriting.
pub fn copy_photos(
    layout: &OutputLayout,
    collection: &str,
    photos: &[PhotoSource],
) -> Result<(), ProcessError> {
    photos.par_iter().try_for_each(|photo| {
        check_source(photo)?;
        let dest = photo_outputs(layout, collection, photo).copy;
        tracing::debug!(photo = %photo.file_name, output = %dest.display(), "copy");
        std::fs::copy(&photo.path, &dest).map_err(|error| ProcessError::Copy {
            source_path: photo.path.clone(),
            dest: dest.clone(),
            error,
        })?;
        Ok(())
    })
}

/// Thumbnails first, then originals.
pub fn process_collection(
    backend: &impl ImageBackend,
    layout: &OutputLayout,
    collection: &str,
    photos: &[PhotoSource],
    config: &ProcessConfig,
) -> Result<CollectionReport, ProcessError> {
    generate_thumbnails(backend, layout, collection, photos, config)?;
    copy_photos(layout, collection, photos)?;
    Ok(CollectionReport {
        name: collection.to_string(),
        photos: photos.len(),
    })
}
