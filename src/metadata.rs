//! Photo description resolution.
//!
//! Every photo in the render model carries a description, and it is never
//! empty. The text comes from one of two embedded EXIF fields, checked in a
//! fixed priority order, or from the configured default.
//!
//! ## Resolution priority
//!
//! | Priority | Field | Tag |
//! |---|---|---|
//! | 1 | EXIF `UserComment` | `0x9286` (37510) |
//! | 2 | TIFF `ImageDescription` | `0x010E` (270) |
//! | 3 | `default_description` from config | |
//!
//! The first field whose normalized value is non-empty wins. Normalization
//! strips leading NUL padding (some cameras left-pad the comment with NULs)
//! and trailing NUL terminators. A field that is not valid UTF-8 is skipped.
//!
//! When the photo has no EXIF block at all, or the block cannot be parsed,
//! the default is used directly.
//!
//! Every fallback is logged through `tracing`; the resolved
//! [`DescriptionSource`] is returned alongside the text so callers can report
//! it too.

use crate::imaging::{BackendError, ImageBackend, ImageMetadata};
use std::fmt;
use std::path::Path;

/// An embedded metadata field that can supply a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptionField {
    UserComment,
    ImageDescription,
}

/// Description fields in the order they are consulted.
pub const DESCRIPTION_FIELDS: [DescriptionField; 2] = [
    DescriptionField::UserComment,
    DescriptionField::ImageDescription,
];

impl DescriptionField {
    /// EXIF tag number of the field.
    pub const fn tag(self) -> u16 {
        match self {
            DescriptionField::UserComment => 0x9286,
            DescriptionField::ImageDescription => 0x010E,
        }
    }

    fn value(self, metadata: &ImageMetadata) -> Option<&[u8]> {
        match self {
            DescriptionField::UserComment => metadata.user_comment.as_deref(),
            DescriptionField::ImageDescription => metadata.image_description.as_deref(),
        }
    }
}

impl fmt::Display for DescriptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptionField::UserComment => f.write_str("user comment"),
            DescriptionField::ImageDescription => f.write_str("image description"),
        }
    }
}

/// Where a resolved description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    /// Taken from an embedded field.
    Embedded(DescriptionField),
    /// No metadata block; default used.
    NoMetadata,
    /// Metadata present, but no field held usable text; default used.
    NoDescription,
}

/// A resolved, non-empty description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub source: DescriptionSource,
}

impl Description {
    fn fallback(default: &str, source: DescriptionSource) -> Self {
        Self {
            text: default.to_string(),
            source,
        }
    }

    pub fn is_default(&self) -> bool {
        !matches!(self.source, DescriptionSource::Embedded(_))
    }
}

/// Why a field's raw bytes were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    Empty,
    NotUtf8,
}

/// Normalize a raw field value: validate UTF-8, strip NUL padding.
///
/// ```
/// # use photo_gallery::metadata::{normalize_text, Rejected};
/// assert_eq!(normalize_text(b"\0\0sunset"), Ok("sunset".to_string()));
/// assert_eq!(normalize_text(b"\0\0\0"), Err(Rejected::Empty));
/// ```
pub fn normalize_text(raw: &[u8]) -> Result<String, Rejected> {
    let text = std::str::from_utf8(raw).map_err(|_| Rejected::NotUtf8)?;
    let text = text.trim_start_matches('\0').trim_end_matches('\0');
    if text.is_empty() {
        Err(Rejected::Empty)
    } else {
        Ok(text.to_string())
    }
}

/// Resolve a description from an optional metadata block.
///
/// `name` only labels log lines. `default` must be non-empty; config
/// validation guarantees it for the pipeline.
pub fn resolve_description(
    metadata: Option<&ImageMetadata>,
    default: &str,
    name: &str,
) -> Description {
    let Some(metadata) = metadata else {
        tracing::info!(photo = name, "no metadata found, using default description");
        return Description::fallback(default, DescriptionSource::NoMetadata);
    };

    for field in DESCRIPTION_FIELDS {
        let Some(raw) = field.value(metadata) else {
            continue;
        };
        match normalize_text(raw) {
            Ok(text) => {
                tracing::debug!(photo = name, %field, "description found");
                return Description {
                    text,
                    source: DescriptionSource::Embedded(field),
                };
            }
            Err(Rejected::NotUtf8) => {
                tracing::warn!(photo = name, %field, "field is not valid UTF-8, skipping");
            }
            Err(Rejected::Empty) => {
                tracing::debug!(photo = name, %field, "field is empty, skipping");
            }
        }
    }

    tracing::info!(photo = name, "no description found, using default");
    Description::fallback(default, DescriptionSource::NoDescription)
}

/// Read a photo's metadata through `backend` and resolve its description.
///
/// Only I/O failure reading the file is an error.
pub fn describe(
    backend: &impl ImageBackend,
    path: &Path,
    default: &str,
) -> Result<Description, BackendError> {
    let metadata = backend.read_metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    Ok(resolve_description(metadata.as_ref(), default, &name))
}
