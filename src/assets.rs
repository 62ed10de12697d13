//! Static asset publishing.
//!
//! The theme's `static/` directory is copied to `<output>/static`. Any
//! previous `<output>/static` is removed first, so files dropped from the theme
//! disappear from the output as well: the directory is replaced, not merged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Theme static directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to walk static directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> AssetError + '_ {
    move |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetReport {
    /// Regular files copied.
    pub files: usize,
}

/// Replace `dest` with a recursive copy of `source`.
pub fn publish_static(source: &Path, dest: &Path) -> Result<AssetReport, AssetError> {
    if !source.is_dir() {
        return Err(AssetError::MissingSource(source.to_path_buf()));
    }

    match fs::remove_dir_all(dest) {
        Ok(()) => tracing::debug!(path = %dest.display(), "removed previous static dir"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(dest)(e)),
    }

    let mut report = AssetReport::default();
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        // WalkDir yields paths under `source`, so the prefix always strips
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_err(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_err(&target))?;
            report.files += 1;
        }
    }

    tracing::debug!(files = report.files, dest = %dest.display(), "static assets published");
    Ok(report)
}
