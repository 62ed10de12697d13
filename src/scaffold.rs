//! Output directory scaffolding.
//!
//! Creates the output root, the gallery base, and for every collection its
//! directory and nested `thumbnails/` directory. Directories that already exist
//! are reported as [`EnsureOutcome::AlreadyPresent`] and left untouched, so
//! scaffolding the same tree twice is a no-op.

use crate::layout::OutputLayout;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Failed to create directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyPresent,
}

/// What a scaffolded directory is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirRole {
    OutputRoot,
    GalleryBase,
    Collection(String),
    Thumbnails(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldEntry {
    pub role: DirRole,
    pub path: PathBuf,
    pub outcome: EnsureOutcome,
}

/// One entry per directory, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub entries: Vec<ScaffoldEntry>,
}

impl ScaffoldReport {
    pub fn created(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == EnsureOutcome::Created)
            .count()
    }
}

/// Make sure `path` exists as a directory.
pub fn ensure_dir(path: &Path) -> Result<EnsureOutcome, ScaffoldError> {
    if path.is_dir() {
        return Ok(EnsureOutcome::AlreadyPresent);
    }
    if path.exists() {
        return Err(ScaffoldError::NotADirectory(path.to_path_buf()));
    }
    std::fs::create_dir_all(path).map_err(|source| ScaffoldError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(EnsureOutcome::Created)
}

/// Build the output directory tree for `collections`.
pub fn scaffold(
    layout: &OutputLayout,
    collections: &[String],
) -> Result<ScaffoldReport, ScaffoldError> {
    let mut planned = vec![
        (DirRole::OutputRoot, layout.output_root().to_path_buf()),
        (DirRole::GalleryBase, layout.gallery_base()),
    ];
    for name in collections {
        planned.push((DirRole::Collection(name.clone()), layout.collection_dir(name)));
        planned.push((DirRole::Thumbnails(name.clone()), layout.thumbnails_dir(name)));
    }

    let mut report = ScaffoldReport::default();
    for (role, path) in planned {
        let outcome = ensure_dir(&path)?;
        match outcome {
            EnsureOutcome::Created => tracing::debug!(path = %path.display(), "created"),
            EnsureOutcome::AlreadyPresent => {
                tracing::debug!(path = %path.display(), "already exists, ignoring")
            }
        }
        report.entries.push(ScaffoldEntry {
            role,
            path,
            outcome,
        });
    }
    Ok(report)
}
