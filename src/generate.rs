//! HTML gallery generation.
//!
//! Builds the [`RenderModel`] from the input tree and renders it through a
//! [`TemplateEngine`] into `<output>/index.html`.
//!
//! ## Render model
//!
//! - Collections sorted by name.
//! - Photos discovered with the same rule as the thumbnail pass
//!   ([`scan::discover_photos`]) and sorted by origin path.
//! - Each photo's description resolved through [`metadata::describe`], so it is
//!   never empty.
//!
//! Only one page is generated; the theme decides how collections are laid out.

use crate::config::GalleryConfig;
use crate::imaging::{BackendError, ImageBackend};
use crate::layout::{OutputLayout, thumbnail_path};
use crate::metadata;
use crate::scan::{self, ScanError};
use crate::templating::{TemplateEngine, TemplateError};
use crate::types::{Collection, Photo, RenderModel};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template every theme must provide.
pub const INDEX_TEMPLATE: &str = "index.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Failed to read metadata: {0}")]
    Metadata(#[from] BackendError),
    #[error("Render error: {0}")]
    Template(#[from] TemplateError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered page on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub path: PathBuf,
    pub collections: usize,
    pub photos: usize,
    /// Photos shown with the configured default description.
    pub default_descriptions: usize,
}

/// Build one collection's photo records.
pub fn collect_photos(
    backend: &impl ImageBackend,
    layout: &OutputLayout,
    collection_dir: &Path,
    name: &str,
    default_description: &str,
) -> Result<Collection, GenerateError> {
    let mut photos = scan::discover_photos(collection_dir)?
        .into_iter()
        .map(|source| -> Result<Photo, GenerateError> {
            let origin = layout.origin(name, &source.file_name);
            let description = metadata::describe(backend, &source.path, default_description)?;
            Ok(Photo {
                thumbnail: thumbnail_path(&origin),
                origin,
                default_description: description.is_default(),
                description: description.text,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    photos.sort_by(|a, b| a.origin.cmp(&b.origin));

    Ok(Collection {
        name: name.to_string(),
        photos,
    })
}

/// Assemble the render model for `collections`.
pub fn build_render_model(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
    layout: &OutputLayout,
    collections: &[String],
) -> Result<RenderModel, GenerateError> {
    let mut names: Vec<&String> = collections.iter().collect();
    names.sort();

    let collections = names
        .into_iter()
        .map(|name| {
            collect_photos(
                backend,
                layout,
                &config.gallery_path.join(name),
                name,
                &config.default_description,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RenderModel {
        version: crate::VERSION.to_string(),
        sitename: config.site_name.clone(),
        thumbnail_size: config.thumbnail_size(),
        collections,
    })
}

/// Render `model` through `engine` and write `<output>/index.html`.
pub fn render_gallery(
    engine: &impl TemplateEngine,
    model: &RenderModel,
    layout: &OutputLayout,
) -> Result<GeneratedPage, GenerateError> {
    let html = engine.render(INDEX_TEMPLATE, model)?;
    let path = layout.index_page();
    std::fs::write(&path, html).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;

    let photos = model.collections.iter().flat_map(|c| &c.photos);
    Ok(GeneratedPage {
        path,
        collections: model.collections.len(),
        photos: photos.clone().count(),
        default_descriptions: photos.filter(|p| p.default_description).count(),
    })
}

/// Build the render model and write the page.
pub fn generate(
    backend: &impl ImageBackend,
    engine: &impl TemplateEngine,
    config: &GalleryConfig,
    layout: &OutputLayout,
    collections: &[String],
) -> Result<GeneratedPage, GenerateError> {
    let model = build_render_model(backend, config, layout, collections)?;
    render_gallery(engine, &model, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::ImageMetadata;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::create_gallery;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Engine that records models and renders a fixed string.
    #[derive(Default)]
    struct RecordingEngine {
        rendered: Mutex<Vec<(String, RenderModel)>>,
    }

    impl TemplateEngine for RecordingEngine {
        fn render(&self, name: &str, model: &RenderModel) -> Result<String, TemplateError> {
            self.rendered
                .lock()
                .unwrap()
                .push((name.to_string(), model.clone()));
            Ok("<html>rendered</html>".to_string())
        }
    }

    fn config_for(tmp: &Path) -> GalleryConfig {
        GalleryConfig {
            gallery_path: tmp.join("gallery"),
            output_path: tmp.join("output"),
            ..GalleryConfig::default()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collections_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path());
        create_gallery(
            &config.gallery_path,
            &[("beach", &["a.jpg"]), ("alps", &["b.jpg"])],
        );
        let layout = OutputLayout::from_config(&config).unwrap();

        let model = build_render_model(
            &MockBackend::new(),
            &config,
            &layout,
            &names(&["beach", "alps"]),
        )
        .unwrap();

        let order: Vec<&str> = model.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["alps", "beach"]);
    }

    #[test]
    fn photos_sorted_by_origin_with_thumbnail_paths() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path());
        create_gallery(
            &config.gallery_path,
            &[("beach", &["c.jpeg", "a.jpg", "B.JPG"])],
        );
        let layout = OutputLayout::from_config(&config).unwrap();

        let model =
            build_render_model(&MockBackend::new(), &config, &layout, &names(&["beach"])).unwrap();

        let photos = &model.collections[0].photos;
        let origins: Vec<&str> = photos.iter().map(|p| p.origin.as_str()).collect();
        assert_eq!(
            origins,
            vec![
                "gallery/beach/B.JPG",
                "gallery/beach/a.jpg",
                "gallery/beach/c.jpeg"
            ]
        );
        for photo in photos {
            assert_eq!(photo.thumbnail, thumbnail_path(&photo.origin));
        }
    }

    #[test]
    fn model_carries_site_settings() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(tmp.path());
        config.site_name = "Holidays".into();
        config.thumbnails.size = [300, 200];
        create_gallery(&config.gallery_path, &[]);
        let layout = OutputLayout::from_config(&config).unwrap();

        let model = build_render_model(&MockBackend::new(), &config, &layout, &[]).unwrap();

        assert_eq!(model.version, crate::VERSION);
        assert_eq!(model.sitename, "Holidays");
        assert_eq!(model.thumbnail_size, (300, 200));
        assert!(model.collections.is_empty());
    }

    #[test]
    fn descriptions_resolved_per_photo() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path());
        create_gallery(&config.gallery_path, &[("beach", &["a.jpg", "b.jpg"])]);
        let layout = OutputLayout::from_config(&config).unwrap();
        let backend = MockBackend::with_metadata(vec![(
            config.gallery_path.join("beach").join("a.jpg"),
            ImageMetadata {
                user_comment: Some(b"\0\0sunset".to_vec()),
                image_description: None,
            },
        )]);

        let model = build_render_model(&backend, &config, &layout, &names(&["beach"])).unwrap();

        let descriptions: Vec<&str> = model.collections[0]
            .photos
            .iter()
            .map(|p| p.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["sunset", "no description"]);
        let defaulted: Vec<bool> = model.collections[0]
            .photos
            .iter()
            .map(|p| p.default_description)
            .collect();
        assert_eq!(defaulted, vec![false, true]);
    }

    #[test]
    fn non_jpeg_files_are_not_rendered() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path());
        create_gallery(&config.gallery_path, &[("beach", &["a.jpg"])]);
        fs::write(config.gallery_path.join("beach/notes.txt"), "x").unwrap();
        let layout = OutputLayout::from_config(&config).unwrap();

        let model =
            build_render_model(&MockBackend::new(), &config, &layout, &names(&["beach"])).unwrap();
        assert_eq!(model.collections[0].photos.len(), 1);
    }

    #[test]
    fn render_writes_index_page() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path());
        create_gallery(&config.gallery_path, &[("beach", &["a.jpg", "b.jpg"])]);
        let layout = OutputLayout::from_config(&config).unwrap();
        fs::create_dir_all(layout.output_root()).unwrap();
        let engine = RecordingEngine::default();

        let page = generate(
            &MockBackend::new(),
            &engine,
            &config,
            &layout,
            &names(&["beach"]),
        )
        .unwrap();

        assert_eq!(page.path, layout.index_page());
        assert_eq!((page.collections, page.photos), (1, 2));
        assert_eq!(page.default_descriptions, 2);
        assert_eq!(
            fs::read_to_string(&page.path).unwrap(),
            "<html>rendered</html>"
        );
        let rendered = engine.rendered.lock().unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].0, INDEX_TEMPLATE);
    }

    #[test]
    fn missing_output_root_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let layout = OutputLayout::new(tmp.path().join("missing"), "gallery");
        let model = RenderModel {
            version: "0.9.0".into(),
            sitename: "x".into(),
            thumbnail_size: (1, 1),
            collections: vec![],
        };

        let result = render_gallery(&RecordingEngine::default(), &model, &layout);
        assert!(matches!(result, Err(GenerateError::Write { .. })));
    }
}
