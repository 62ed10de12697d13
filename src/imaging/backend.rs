//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs
//! from an imaging implementation: read the embedded text metadata of a photo
//! and produce a thumbnail. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::ThumbnailParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Text-bearing fields found in a photo's EXIF block.
///
/// Values are raw bytes as stored, except that the EXIF character-code
/// prefix of the user comment has already been removed and UTF-16 comments
/// have been transcoded to UTF-8. NUL padding is left in place; the
/// [`metadata`](crate::metadata) module owns normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// EXIF `UserComment` (tag 0x9286).
    pub user_comment: Option<Vec<u8>>,
    /// TIFF `ImageDescription` (tag 0x010E).
    pub image_description: Option<Vec<u8>>,
}

/// Trait for image processing backends.
pub trait ImageBackend: Sync {
    /// Read the embedded text metadata.
    ///
    /// `Ok(None)` means the file carries no usable metadata block. I/O failure
    /// opening the file is an error.
    fn read_metadata(&self, path: &Path) -> Result<Option<ImageMetadata>, BackendError>;

    /// Execute a thumbnail operation (crop-to-fill + JPEG encode).
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}
