//! Shared test utilities for the photo-gallery test suite.
//!
//! Provides synthetic JPEG writers (with and without an EXIF block), a
//! minimal theme, and a gallery tree builder.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let input = tmp.path().join("gallery");
//! create_gallery(&input, &[("beach", &["a.jpg"]), ("alps", &[])]);
//! write_theme(&tmp.path().join("themes/simple"));
//! ```

use image::{ImageEncoder, RgbImage};
use std::fs;
use std::path::Path;

// =========================================================================
// Synthetic JPEGs
// =========================================================================

/// Encode a gradient JPEG with the given dimensions into memory.
pub fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    fs::write(path, encode_test_jpeg(width, height)).unwrap();
}

/// Text fields to embed in a synthetic EXIF block. Bytes are written verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifFields<'a> {
    pub image_description: Option<&'a [u8]>,
    pub user_comment: Option<&'a [u8]>,
}

/// Create a JPEG carrying an APP1 EXIF segment with the given fields.
pub fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32, fields: &ExifFields) {
    write_jpeg_with_app1(path, width, height, &exif_app1_segment(fields));
}

/// Like [`create_test_jpeg_with_exif`], but the ExifIFDPointer in IFD0 points
/// past the end of the block, so only IFD0 fields are recoverable.
pub fn create_test_jpeg_with_bad_exif_pointer(
    path: &Path,
    width: u32,
    height: u32,
    fields: &ExifFields,
) {
    let mut tiff = exif_tiff(fields);
    let count = u16::from_le_bytes([tiff[8], tiff[9]]) as usize;
    for i in 0..count {
        let entry = 10 + 12 * i;
        if u16::from_le_bytes([tiff[entry], tiff[entry + 1]]) == TAG_EXIF_IFD_POINTER {
            tiff[entry + 8..entry + 12].copy_from_slice(&0xFFFF_FF00u32.to_le_bytes());
        }
    }
    write_jpeg_with_app1(path, width, height, &app1_segment(&tiff));
}

fn write_jpeg_with_app1(path: &Path, width: u32, height: u32, segment: &[u8]) {
    let jpeg = encode_test_jpeg(width, height);
    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    // SOI, then APP1, then the rest of the encoder output
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&jpeg[2..]);
    fs::write(path, out).unwrap();
}

// =========================================================================
// EXIF (little-endian TIFF) writer
// =========================================================================

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_UNDEFINED: u16 = 7;

const TAG_IMAGE_DESCRIPTION: u16 = 0x010E;
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_USER_COMMENT: u16 = 0x9286;

struct Entry {
    tag: u16,
    kind: u16,
    data: Vec<u8>,
}

fn ifd_len(entries: &[Entry]) -> usize {
    2 + 12 * entries.len() + 4
}

/// Out-of-line data area of an IFD (values longer than 4 bytes, word aligned).
fn data_len(entries: &[Entry]) -> usize {
    entries
        .iter()
        .filter(|e| e.data.len() > 4)
        .map(|e| e.data.len() + e.data.len() % 2)
        .sum()
}

fn write_ifd(buf: &mut Vec<u8>, entries: &[Entry]) {
    let offset = buf.len();
    let mut data_offset = offset + ifd_len(entries);
    let mut data = Vec::new();

    buf.extend((entries.len() as u16).to_le_bytes());
    for entry in entries {
        let count = if entry.kind == TYPE_LONG {
            entry.data.len() / 4
        } else {
            entry.data.len()
        };
        buf.extend(entry.tag.to_le_bytes());
        buf.extend(entry.kind.to_le_bytes());
        buf.extend((count as u32).to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            buf.extend(inline);
        } else {
            buf.extend((data_offset as u32).to_le_bytes());
            data.extend(&entry.data);
            if entry.data.len() % 2 == 1 {
                data.push(0);
            }
            data_offset = offset + ifd_len(entries) + data.len();
        }
    }
    buf.extend(0u32.to_le_bytes());
    buf.extend(data);
}

/// Build the TIFF structure: IFD0 (ImageDescription, ExifIFDPointer) and an
/// Exif IFD (UserComment).
fn exif_tiff(fields: &ExifFields) -> Vec<u8> {
    let mut ifd0 = Vec::new();
    if let Some(desc) = fields.image_description {
        let mut data = desc.to_vec();
        data.push(0);
        ifd0.push(Entry {
            tag: TAG_IMAGE_DESCRIPTION,
            kind: TYPE_ASCII,
            data,
        });
    }

    let exif_ifd: Vec<Entry> = fields
        .user_comment
        .map(|comment| {
            vec![Entry {
                tag: TAG_USER_COMMENT,
                kind: TYPE_UNDEFINED,
                data: comment.to_vec(),
            }]
        })
        .unwrap_or_default();

    if !exif_ifd.is_empty() {
        // Pointer entry is counted before its value is known; the length is fixed.
        ifd0.push(Entry {
            tag: TAG_EXIF_IFD_POINTER,
            kind: TYPE_LONG,
            data: vec![0; 4],
        });
        let exif_offset = 8 + ifd_len(&ifd0) + data_len(&ifd0);
        if let Some(pointer) = ifd0.last_mut() {
            pointer.data = (exif_offset as u32).to_le_bytes().to_vec();
        }
    }

    let mut tiff = Vec::new();
    tiff.extend(b"II");
    tiff.extend(42u16.to_le_bytes());
    tiff.extend(8u32.to_le_bytes());
    write_ifd(&mut tiff, &ifd0);
    if !exif_ifd.is_empty() {
        write_ifd(&mut tiff, &exif_ifd);
    }
    tiff
}

/// A complete JPEG APP1 segment (`FF E1`, length, `Exif\0\0`, TIFF).
pub fn exif_app1_segment(fields: &ExifFields) -> Vec<u8> {
    app1_segment(&exif_tiff(fields))
}

fn app1_segment(tiff: &[u8]) -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE1];
    segment.extend(((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend(b"Exif\0\0");
    segment.extend(tiff);
    segment
}

// =========================================================================
// Gallery and theme fixtures
// =========================================================================

/// Template used by test themes: one line per photo, easy to assert on.
pub const TEST_TEMPLATE: &str = "\
<h1>{{ sitename }}</h1><p>v{{ version }} {{ thumbnail_size[0] }}x{{ thumbnail_size[1] }}</p>
{% for collection in collections %}<h2>{{ collection.name }}</h2>
{% for photo in collection.photos %}<a href=\"{{ photo.origin }}\"><img src=\"{{ photo.thumbnail }}\" alt=\"{{ photo.description }}\"></a>
{% endfor %}{% endfor %}";

/// Write a minimal theme (`index.html` + `static/style.css`) into `dir`.
pub fn write_theme(dir: &Path) {
    fs::create_dir_all(dir.join("static/css")).unwrap();
    fs::write(dir.join("index.html"), TEST_TEMPLATE).unwrap();
    fs::write(dir.join("static/css/style.css"), "body { margin: 0; }").unwrap();
}

/// Create an input root with one directory per collection, each holding
/// small JPEGs with the given file names.
pub fn create_gallery(root: &Path, collections: &[(&str, &[&str])]) {
    fs::create_dir_all(root).unwrap();
    for (name, photos) in collections {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for photo in photos.iter() {
            create_test_jpeg(&dir.join(photo), 64, 48);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app1_segment_length_matches_payload() {
        let segment = exif_app1_segment(&ExifFields {
            image_description: Some(b"a longer description"),
            user_comment: Some(b"ASCII\0\0\0comment"),
        });
        let declared = u16::from_be_bytes([segment[2], segment[3]]) as usize;
        assert_eq!(declared + 2, segment.len());
        assert_eq!(&segment[4..10], b"Exif\0\0");
    }

    #[test]
    fn exif_jpeg_still_decodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("x.jpg");
        create_test_jpeg_with_exif(
            &path,
            20,
            10,
            &ExifFields {
                image_description: Some(b"d"),
                user_comment: None,
            },
        );
        assert_eq!(image::image_dimensions(&path).unwrap(), (20, 10));
    }
}
