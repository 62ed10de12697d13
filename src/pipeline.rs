//! The build pipeline.
//!
//! ```text
//! discover collections
//!   → scaffold output tree
//!   → per collection: thumbnails, then originals
//!   → render index.html
//!   → publish theme static/
//! ```
//!
//! Stages run in order and the first error aborts the run. Nothing is rolled
//! back, so a failed build can leave a partially written output tree.
//!
//! Progress is reported as [`BuildEvent`]s over an optional channel; the CLI
//! prints them from a separate thread while the pipeline works.

use crate::assets::{self, AssetError, AssetReport};
use crate::config::{ConfigError, GalleryConfig};
use crate::generate::{self, GenerateError, GeneratedPage};
use crate::imaging::{ImageBackend, RustBackend};
use crate::layout::OutputLayout;
use crate::process::{self, CollectionReport, ProcessConfig, ProcessError};
use crate::scaffold::{self, ScaffoldError, ScaffoldReport};
use crate::scan::{self, ScanError};
use crate::templating::{MiniJinjaEngine, TemplateEngine, TemplateError};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Assets(#[from] AssetError),
}

/// Progress notifications, sent in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    Scaffolded(ScaffoldReport),
    ThumbnailsStarted { collections: usize },
    CollectionDone(CollectionReport),
    PageRendered(GeneratedPage),
    AssetsPublished(AssetReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub scaffold: ScaffoldReport,
    pub collections: Vec<CollectionReport>,
    pub page: GeneratedPage,
    pub assets: AssetReport,
}

impl BuildReport {
    pub fn total_photos(&self) -> usize {
        self.collections.iter().map(|c| c.photos).sum()
    }
}

fn emit(events: Option<&Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        // receiver gone means nobody is printing; the build carries on
        tx.send(event).ok();
    }
}

/// Build the gallery with the production imaging backend and theme engine.
pub fn build(
    config: &GalleryConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let engine = MiniJinjaEngine::new(&config.theme_dir())?;
    build_with(&RustBackend::new(), &engine, config, events)
}

/// Build the gallery with explicit backend and engine (allows testing with mocks).
pub fn build_with(
    backend: &impl ImageBackend,
    engine: &impl TemplateEngine,
    config: &GalleryConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    config.validate()?;
    let events = events.as_ref();
    let layout = OutputLayout::from_config(config)?;

    let collections = scan::discover_collections(&config.gallery_path)?;
    tracing::info!(
        count = collections.len(),
        root = %config.gallery_path.display(),
        "discovered collections"
    );

    let scaffold = scaffold::scaffold(&layout, &collections)?;
    emit(events, BuildEvent::Scaffolded(scaffold.clone()));

    emit(
        events,
        BuildEvent::ThumbnailsStarted {
            collections: collections.len(),
        },
    );
    let process_config = ProcessConfig::from_gallery_config(config);
    let mut reports = Vec::with_capacity(collections.len());
    for name in &collections {
        let photos = scan::discover_photos(&config.gallery_path.join(name))?;
        let report = process::process_collection(backend, &layout, name, &photos, &process_config)?;
        tracing::info!(collection = %name, photos = report.photos, "collection done");
        emit(events, BuildEvent::CollectionDone(report.clone()));
        reports.push(report);
    }

    let page = generate::generate(backend, engine, config, &layout, &collections)?;
    emit(events, BuildEvent::PageRendered(page.clone()));

    let assets = assets::publish_static(&config.theme_static_dir(), &layout.static_dir())?;
    emit(events, BuildEvent::AssetsPublished(assets));

    Ok(BuildReport {
        scaffold,
        collections: reports,
        page,
        assets,
    })
}
