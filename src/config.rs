//! Gallery configuration.
//!
//! Everything the pipeline needs to know is carried by an explicit
//! [`GalleryConfig`] value that is loaded once, validated, and passed into
//! [`pipeline::build`](crate::pipeline::build). Nothing is read from global
//! state, so two builds with different settings can run side by side.
//!
//! ## Config File
//!
//! The CLI reads `gallery.toml` from the working directory (override with
//! `--config`). A missing file means "use the stock defaults".
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "photo gallery"
//! theme = "simple"                   # Subdirectory of themes_dir
//! themes_dir = "themes"
//! gallery_path = "gallery"           # Input root: one subdirectory per collection
//! output_path = "output"
//! default_description = "no description"
//!
//! [thumbnails]
//! size = [256, 160]                  # width, height in pixels
//! quality = 90                       # JPEG quality (1-100)
//!
//! [processing]
//! max_processes = 4                  # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Title rendered at the top of the page.
    pub site_name: String,
    /// Theme name; selects `<themes_dir>/<theme>` for templates and static assets.
    pub theme: String,
    /// Directory holding all themes.
    pub themes_dir: PathBuf,
    /// Input root. Each subdirectory is one collection.
    pub gallery_path: PathBuf,
    /// Output root. Receives `index.html`, `static/` and the gallery tree.
    pub output_path: PathBuf,
    /// Description used when a photo carries no usable embedded text.
    pub default_description: String,
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            site_name: "photo gallery".to_string(),
            theme: "simple".to_string(),
            themes_dir: PathBuf::from("themes"),
            gallery_path: PathBuf::from("gallery"),
            output_path: PathBuf::from("output"),
            default_description: "no description".to_string(),
            thumbnails: ThumbnailsConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.thumbnails.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size values must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.default_description.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_description must not be empty".into(),
            ));
        }
        if self.theme.is_empty() {
            return Err(ConfigError::Validation("theme must not be empty".into()));
        }
        if gallery_dir_name(&self.gallery_path).is_none() {
            return Err(ConfigError::Validation(format!(
                "gallery_path '{}' must end in a named directory",
                self.gallery_path.display()
            )));
        }
        Ok(())
    }

    /// Directory of the selected theme (`<themes_dir>/<theme>`).
    pub fn theme_dir(&self) -> PathBuf {
        self.themes_dir.join(&self.theme)
    }

    /// The theme's static asset directory.
    pub fn theme_static_dir(&self) -> PathBuf {
        self.theme_dir().join("static")
    }

    /// Thumbnail target as `(width, height)`.
    pub fn thumbnail_size(&self) -> (u32, u32) {
        let [width, height] = self.thumbnails.size;
        (width, height)
    }
}

/// Name of the gallery base directory, mirrored under the output root.
///
/// This is the final component of the input root, so `photos/gallery`
/// publishes to `<output>/gallery/...`.
pub fn gallery_dir_name(gallery_path: &Path) -> Option<&str> {
    gallery_path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Exact output size as `[width, height]`; sources are cropped to fill.
    pub size: [u32; 2],
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            size: [256, 160],
            quality: 90,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel thumbnail/copy workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never less than one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Load and validate a config file.
///
/// Returns the stock defaults when `path` does not exist. Returns `Err` if the
/// file exists but contains invalid TOML, unknown keys, or invalid values.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        GalleryConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Title rendered at the top of the gallery page.
site_name = "photo gallery"

# Theme name. Templates are loaded from <themes_dir>/<theme>/ and the
# theme's static/ directory is copied to <output_path>/static/.
theme = "simple"
themes_dir = "themes"

# Input root. Every subdirectory is one collection of .jpg/.jpeg photos.
gallery_path = "gallery"

# Output root.
output_path = "output"

# Used when a photo has no EXIF user comment or image description.
default_description = "no description"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Exact thumbnail size as [width, height]. Photos are cropped to fill.
size = [256, 160]

# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel thumbnail/copy workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
