//! glee-config: validated GLEE lens-model runs rendered to GLEE configuration files.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

use std::path::Path;

use adapters::{EmbeddedTemplateStore, FilesystemStore};
use ports::TemplateStore;

pub use adapters::MemoryStore;
pub use app::commands::check::{CheckReport, SourceSummary};
pub use app::commands::init::{InitOptions, InitOutcome};
pub use app::commands::render::{RenderOptions, RenderOutcome};
pub use domain::{
    AppError, CovarianceMatrix, ExtendedSource, ExtendedSourceParams, GleeConfig, Header,
    InvalidArgument, LightProfile, LineOfSight, McmcParams, Minimiser, ModLight, Optimiser, Prior,
    PriorKind, RegType, Regularisation, Render, SamplingFunction, Shape, SimanParams,
};
pub use ports::{ModelStore, StarterTemplate};

/// Parse TOML model content into a validated configuration.
pub fn parse_model(content: &str) -> Result<GleeConfig, AppError> {
    domain::configuration::parse_model(content)
}

/// Render TOML model content to a GLEE configuration document.
pub fn render_model(content: &str) -> Result<String, AppError> {
    Ok(parse_model(content)?.render())
}

/// Load a model file, resolving relative paths against the current directory.
pub fn load_model(path: impl AsRef<Path>) -> Result<GleeConfig, AppError> {
    let store = FilesystemStore::current()?;
    domain::configuration::load_model(&store, path.as_ref())
}

/// Render `config` and write it to `path`.
///
/// Fails with `AppError::OutputExists` when the file exists and `overwrite` is false.
pub fn write_config(
    path: impl AsRef<Path>,
    config: &GleeConfig,
    overwrite: bool,
) -> Result<(), AppError> {
    let store = FilesystemStore::current()?;
    app::commands::render::write_document(&store, path.as_ref(), &config.render(), overwrite)
}

/// Starter model templates embedded in this build.
pub fn starter_templates() -> Vec<StarterTemplate> {
    EmbeddedTemplateStore::new().templates()
}

/// A single embedded starter template by name.
pub fn starter_template(name: &str) -> Result<StarterTemplate, AppError> {
    EmbeddedTemplateStore::new().template(name)
}
