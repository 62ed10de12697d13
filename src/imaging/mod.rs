//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **EXIF text** | `kamadak-exif` (UserComment, ImageDescription) |
//! | **Thumbnail** | centered crop + `resize_exact` (Lanczos3) + JPEG encoder |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining config + backend

pub mod backend;
mod exif_reader;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, ImageMetadata};
pub use operations::{ThumbnailConfig, create_thumbnail, plan_thumbnail};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
