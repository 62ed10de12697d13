//! Collection and photo discovery.
//!
//! ## Directory Structure
//!
//! ```text
//! gallery/                 # Input root
//! ├── alps/                # Collection (directory name = identity)
//! │   ├── 001.jpg
//! │   └── summit.JPEG
//! └── beach/
//!     └── sunset.jpg
//! ```
//!
//! Collections are the direct subdirectories of the input root. Photos are the
//! regular files directly inside a collection whose extension is `jpg` or
//! `jpeg` in any letter case. There is no recursion below a collection.
//! Hidden entries (leading `.`) are skipped at both levels.
//!
//! The same [`discover_photos`] rule feeds both the thumbnail/copy pass and the
//! render pass, so the page never links to a photo that was not published.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

/// Extensions (compared case-insensitively) recognized as photos.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// A photo file found inside a collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSource {
    /// Path on disk, inside the input root.
    pub path: PathBuf,
    pub file_name: String,
}

/// List collection names under the input root, sorted by name.
pub fn discover_collections(root: &Path) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    collect_entries(root)?
        .into_iter()
        .filter(|p| p.is_dir())
        .map(|p| entry_name(&p))
        .collect()
}

/// List the photos of one collection directory, sorted by path.
pub fn discover_photos(collection_dir: &Path) -> Result<Vec<PhotoSource>, ScanError> {
    collect_entries(collection_dir)?
        .into_iter()
        .filter(|p| is_photo(p))
        .map(|path| {
            let file_name = entry_name(&path)?;
            Ok(PhotoSource { path, file_name })
        })
        .collect()
}

/// Whether `path` is a regular file with a recognized photo extension.
pub fn is_photo(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn entry_name(path: &Path) -> Result<String, ScanError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ScanError::NonUtf8Name(path.to_path_buf()))
}

fn collect_entries(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    visible_sorted(fs::read_dir(path)?.map(|e| e.map(|e| e.path())))
}

/// Drop hidden entries and sort. The first entry that failed to read aborts
/// the scan, so a photo never silently goes missing.
fn visible_sorted(
    entries: impl Iterator<Item = io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = entries
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|p| {
            !p.file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
        })
        .collect();

    entries.sort();
    Ok(entries)
}
