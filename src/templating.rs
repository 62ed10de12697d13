//! Template rendering.
//!
//! The gallery page is rendered by a [`TemplateEngine`]: given a template name
//! and the [`RenderModel`], it returns the page text. The production engine
//! wraps a [minijinja](https://docs.rs/minijinja) environment whose loader is
//! rooted at the theme directory, so a theme is just a directory of Jinja
//! templates plus a `static/` folder.
//!
//! The model is exposed to templates as four top-level variables: `version`,
//! `sitename`, `thumbnail_size` and `collections`. Templates ending in `.html`
//! are auto-escaped.

use crate::types::RenderModel;
use minijinja::{Environment, path_loader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Theme directory not found: {0}")]
    MissingTheme(PathBuf),
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

pub trait TemplateEngine {
    fn render(&self, name: &str, model: &RenderModel) -> Result<String, TemplateError>;
}

#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Engine loading templates from `theme_dir`.
    pub fn new(theme_dir: &Path) -> Result<Self, TemplateError> {
        if !theme_dir.is_dir() {
            return Err(TemplateError::MissingTheme(theme_dir.to_path_buf()));
        }
        let mut env = Environment::new();
        env.set_loader(path_loader(theme_dir));
        Ok(Self { env })
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, name: &str, model: &RenderModel) -> Result<String, TemplateError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(model)?)
    }
}
