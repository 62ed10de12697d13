//! # Photo Gallery
//!
//! A static photo gallery generator. Your filesystem is the data source:
//! every subdirectory of the input root is a collection, every JPEG inside it
//! is a photo, and the result is a single browsable `index.html` rendered from
//! a theme.
//!
//! # Architecture: Linear Batch Pipeline
//!
//! ```text
//! gallery/                      output/
//! ├── alps/                     ├── index.html           (rendered from theme)
//! │   └── 001.jpg      ──►      ├── static/              (copied from theme)
//! └── beach/                    └── gallery/
//!     └── sunset.jpg                ├── alps/001.jpg      (original, copied)
//!                                   └── alps/thumbnails/001.jpg
//! ```
//!
//! A build runs five stages in order: discover collections, scaffold the output
//! tree, generate thumbnails and copy originals per collection, render the
//! page, publish static assets. There is no persistent state between runs and
//! no rollback: the first failure stops the build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `gallery.toml` loading, validation, stock defaults |
//! | [`scan`] | Collection and photo discovery |
//! | [`layout`] | Output tree paths, origin and thumbnail path derivation |
//! | [`scaffold`] | Idempotent creation of the output directory tree |
//! | [`process`] | Thumbnail generation and original copying (parallel per collection) |
//! | [`metadata`] | Photo description resolution from EXIF with fallback |
//! | [`imaging`] | Pure-Rust image operations: crop-to-fill thumbnails, EXIF text |
//! | [`generate`] | Render model assembly and `index.html` output |
//! | [`templating`] | Template engine seam and the minijinja implementation |
//! | [`assets`] | Replace-wholesale copy of the theme's `static/` directory |
//! | [`pipeline`] | Orchestrates the stages, emits progress events |
//! | [`types`] | The render model handed to templates |
//! | [`output`] | CLI output formatting for progress events |
//!
//! # Design Decisions
//!
//! ## Themes Are Runtime Templates
//!
//! Page markup lives in the theme directory, not in the binary. A theme is an
//! `index.html` Jinja template plus a `static/` folder, rendered through
//! [minijinja](https://docs.rs/minijinja). Swapping the look of a gallery means
//! editing files, not recompiling.
//!
//! ## Descriptions Never Come Up Empty
//!
//! Every photo shows a description. The EXIF user comment wins, then the image
//! description, then the configured default. Missing or broken metadata is
//! logged and recovered, never fatal. See [`metadata`].
//!
//! ## Paths Derive From the Origin
//!
//! A photo's thumbnail is its origin path with a `thumbnails` segment before the
//! filename, and both on-disk outputs are the origin rebased under the output
//! root. [`layout`] is the only place these rules live, so the page can never
//! link to a file the build did not write.

pub mod assets;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod scaffold;
pub mod scan;
pub mod templating;
pub mod types;

/// Generator version exposed to templates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_helpers;
