//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG) | `image` crate |
//! | Thumbnail crop | `crop_imm` to the target aspect, then `resize_exact` (Lanczos3) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | EXIF text | `kamadak-exif` via [`exif_reader`](super::exif_reader) |

use super::backend::{BackendError, ImageBackend, ImageMetadata};
use super::params::ThumbnailParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Centered crop box `(x, y, width, height)` within a `source` image whose
/// aspect ratio matches `target`.
///
/// Cropping happens before resizing, so no intermediate is larger than the
/// source or the thumbnail.
fn fill_crop_box(source: (u32, u32), target: (u32, u32)) -> (u32, u32, u32, u32) {
    let (sw, sh) = (u64::from(source.0), u64::from(source.1));
    let (tw, th) = (u64::from(target.0.max(1)), u64::from(target.1.max(1)));

    let (cw, ch) = if sw * th > sh * tw {
        // Wider than the target: keep full height
        (((sh * tw + th / 2) / th).clamp(1, sw.max(1)), sh)
    } else {
        (sw, ((sw * th + tw / 2) / tw).clamp(1, sh.max(1)))
    };

    // cw <= sw and ch <= sh, so both fit back into u32
    let (cw, ch) = (cw as u32, ch as u32);
    ((source.0 - cw.min(source.0)) / 2, (source.1 - ch.min(source.1)) / 2, cw, ch)
}

/// Encode and save as baseline JPEG.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn read_metadata(&self, path: &Path) -> Result<Option<ImageMetadata>, BackendError> {
        super::exif_reader::read_exif_text(path)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        let (x, y, cw, ch) =
            fill_crop_box((img.width(), img.height()), (params.width, params.height));
        let thumb = img
            .crop_imm(x, y, cw, ch)
            .resize_exact(params.width, params.height, FilterType::Lanczos3);

        save_jpeg(&thumb, &params.output, params.quality.value())
    }
}
