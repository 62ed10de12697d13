//! EXIF text field extraction via `kamadak-exif`.
//!
//! Only the two description-like fields are read: `UserComment` from the
//! Exif IFD and `ImageDescription` from IFD0.
//!
//! `UserComment` is stored as UNDEFINED bytes led by an 8-byte character-code
//! prefix. `ASCII\0\0\0` is stripped, `UNICODE\0` is transcoded from UTF-16 in
//! the file's byte order, and anything else (including the all-NUL
//! "undefined" prefix) is passed through as-is for NUL stripping downstream.

use super::backend::{BackendError, ImageMetadata};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const ASCII_PREFIX: &[u8] = b"ASCII\0\0\0";
const UNICODE_PREFIX: &[u8] = b"UNICODE\0";

/// Read the text fields of a photo's EXIF block.
///
/// Returns `Ok(None)` when the file has no EXIF block or the block cannot be
/// parsed at all. A block that is only partly broken (say, a bad Exif IFD
/// pointer) still yields whatever fields were read. Only failure to open the
/// file is an error.
pub(crate) fn read_exif_text(path: &Path) -> Result<Option<ImageMetadata>, BackendError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut exif_reader = Reader::new();
    exif_reader.continue_on_error(true);

    let exif = match exif_reader.read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            tracing::warn!(
                path = %path.display(),
                errors = errors.len(),
                "damaged EXIF block, reading intact fields"
            );
            exif
        }
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable EXIF block");
            return Ok(None);
        }
    };

    let little_endian = exif.little_endian();
    let user_comment = exif
        .get_field(Tag::UserComment, In::PRIMARY)
        .and_then(|field| match &field.value {
            Value::Undefined(bytes, _) => Some(decode_user_comment(bytes, little_endian)),
            Value::Ascii(parts) => Some(parts.concat()),
            _ => None,
        });
    let image_description = exif
        .get_field(Tag::ImageDescription, In::PRIMARY)
        .and_then(|field| text_bytes(&field.value));

    Ok(Some(ImageMetadata {
        user_comment,
        image_description,
    }))
}

fn text_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Ascii(parts) => Some(parts.concat()),
        Value::Undefined(bytes, _) | Value::Byte(bytes) => Some(bytes.clone()),
        _ => None,
    }
}

/// Remove the EXIF character-code prefix from a user comment.
fn decode_user_comment(bytes: &[u8], little_endian: bool) -> Vec<u8> {
    if let Some(rest) = bytes.strip_prefix(ASCII_PREFIX) {
        rest.to_vec()
    } else if let Some(rest) = bytes.strip_prefix(UNICODE_PREFIX) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| {
                let pair = [pair[0], pair[1]];
                if little_endian {
                    u16::from_le_bytes(pair)
                } else {
                    u16::from_be_bytes(pair)
                }
            })
            .collect();
        String::from_utf16_lossy(&units).into_bytes()
    } else {
        bytes.to_vec()
    }
}
